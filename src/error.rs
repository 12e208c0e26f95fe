use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("degenerate axis range: min == max == {bound}")]
    DegenerateRange { bound: f64 },

    #[error("re-entrant mutation during listener notification")]
    ReentrantMutation,

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("column {column} expects a {expected} value")]
    ColumnTypeMismatch {
        column: usize,
        expected: &'static str,
    },
}
