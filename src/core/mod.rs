pub mod calculator;
pub mod form;
pub mod theme;

pub use crate::domain::model::{Assessment, DoseResult, Outcome};
pub use crate::domain::ports::{ConfigProvider, Renderer};
pub use crate::utils::error::Result;
