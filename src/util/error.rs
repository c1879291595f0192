#[derive(Debug, thiserror::Error)]
pub enum CmdlineError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Duplicate command: {0}")]
    DuplicateCommand(String),

    #[error("Missing argument <{param}> for {command}")]
    MissingArgument { command: String, param: String },

    #[error("Too many arguments for {command}: {extra}")]
    TooManyArguments { command: String, extra: String },

    #[error("Invalid value {value:?} for <{param}>: expected {expected}")]
    InvalidArgument {
        param: String,
        value: String,
        expected: &'static str,
    },

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Unterminated quote")]
    UnterminatedQuote,

    #[error("Invalid environment pair {0:?}, expected KEY=VALUE")]
    InvalidEnvPair(String),

    #[error("Mutex poisoned: {0}")]
    MutexPoisoned(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("Error: {0}")]
    AnyhowError(#[from] anyhow::Error),

    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML Serialization error: {0}")]
    SerdeYamlError(#[from] serde_yaml::Error),
}
