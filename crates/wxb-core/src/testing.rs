//! Test doubles for the core ports.

use std::{
    future::Future,
    io::{self, Write},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use tracing_subscriber::fmt::MakeWriter;

use crate::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::port::MessagingPort,
    weather::{LookupError, WeatherProvider, WeatherReport},
    Result,
};

pub fn paris_report() -> WeatherReport {
    WeatherReport {
        city: "Paris".to_string(),
        temperature: 18.5,
        feels_like: 17.0,
        humidity: 60.0,
        description: "clear sky".to_string(),
    }
}

/// Provider returning a canned outcome and recording every requested city.
pub struct FakeProvider {
    outcome: std::result::Result<WeatherReport, LookupError>,
    calls: Mutex<Vec<String>>,
    panic_on_call: bool,
}

impl FakeProvider {
    pub fn ok(report: WeatherReport) -> Self {
        Self {
            outcome: Ok(report),
            calls: Mutex::new(Vec::new()),
            panic_on_call: false,
        }
    }

    pub fn err(e: LookupError) -> Self {
        Self {
            outcome: Err(e),
            calls: Mutex::new(Vec::new()),
            panic_on_call: false,
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_call: true,
            ..Self::err(LookupError::Timeout)
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current_weather(
        &self,
        city: &str,
    ) -> std::result::Result<WeatherReport, LookupError> {
        self.calls.lock().unwrap().push(city.to_string());
        if self.panic_on_call {
            panic!("provider exploded");
        }
        self.outcome.clone()
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Messenger that records sent texts; the first `fail_first` sends fail.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(ChatId, String)>>,
    fail_first: AtomicUsize,
}

impl RecordingMessenger {
    pub fn failing(fail_first: usize) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_first: AtomicUsize::new(fail_first),
        }
    }

    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingPort for RecordingMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let should_fail = self
            .fail_first
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(Error::External("telegram error: network down".to_string()));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push((chat_id, text.to_string()));
        Ok(MessageRef {
            chat_id,
            message_id: MessageId(sent.len() as i32),
        })
    }
}

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `fut` with a thread-local subscriber and return its output plus the logs.
///
/// Only valid on a current-thread runtime (the `#[tokio::test]` default).
pub async fn capture_logs<F: Future>(fut: F) -> (F::Output, String) {
    let buf = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);
    let out = fut.await;
    (out, buf.contents())
}
