//! Fixed reply texts.

pub const START_MESSAGE: &str = "👋 Привет! Я бот погоды.\n\n\
Просто напишите название города, и я покажу погоду!\n\
Например: Москва, Париж, Лондон";

pub const HELP_MESSAGE: &str = "🔍 Как пользоваться ботом:\n\n\
• Просто напишите название города\n\
• Или используйте команду /weather город\n\n\
📝 Примеры:\n\
• Москва\n\
• /weather Париж";

pub const MISSING_CITY_MESSAGE: &str = "Пожалуйста, укажите город после команды /weather";

pub const GENERIC_FAILURE_MESSAGE: &str =
    "Произошла ошибка при обработке запроса. Пожалуйста, попробуйте позже.";

/// Commands advertised in the platform's command menu, with descriptions.
pub const COMMAND_MENU: &[(&str, &str)] = &[
    ("start", "Начать работу с ботом"),
    ("help", "Как пользоваться ботом"),
    ("weather", "Погода в городе: /weather город"),
];
