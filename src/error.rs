use thiserror::Error;

#[derive(Debug, Error)]
pub enum DoqlError {
    #[error("config: {message}")]
    Config { message: String },

    #[error("transport: {message}")]
    Transport { message: String },

    #[error("decode: {message}")]
    Decode { message: String },

    #[error("disabled: {message}")]
    Disabled { message: String },

    // The display strings of NoResults and SchemaFetch are part of the
    // runner contract; hosts match on them verbatim.
    #[error("No results. Please check query.")]
    NoResults,

    #[error("Failed getting schema.")]
    SchemaFetch(#[source] Box<DoqlError>),

    #[error("format: {message}")]
    Format { message: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
