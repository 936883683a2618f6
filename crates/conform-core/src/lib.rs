//! # conform-core
//!
//! AV1 一致性分析框架核心库, 提供基础类型定义、错误处理和比特流读取工具.
//!
//! 解码适配层与码流解析器都建立在本 crate 之上.

pub mod bitreader;
pub mod bitwriter;
pub mod error;
pub mod pixel_format;
pub mod rational;

// 重导出常用类型
pub use error::{ConformError, ConformResult};
pub use pixel_format::PixelFormat;
pub use rational::Rational;
