use thiserror::Error;
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("serial port {port} is unavailable: {source}")]
    DeviceUnavailable {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("cannot render an empty window; wait for the first sample")]
    EmptyWindow,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse config file: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("chart display was closed")]
    DisplayClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ScopeError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ScopeError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ScopeError {
    fn from(value: image::ImageError) -> Self {
        ScopeError::Plot(value.to_string())
    }
}
