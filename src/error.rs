use thiserror::Error;

/// Errors raised while resolving a clicked hotspot to its panel.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewerError {
    #[error("no panel with id '{0}'")]
    PanelNotFound(String),

    #[error("panel '{0}' does not declare an open width")]
    MissingOpenWidth(String),

    #[error("panel '{id}' declares an invalid open width: {width}")]
    InvalidOpenWidth { id: String, width: f64 },
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
