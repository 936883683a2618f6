//! # Conform
//!
//! AV1 码流一致性分析工具集.
//!
//! 在外部 AV1 参考解码器之上逐帧收集检查数据, 汇总为一致性测试所需的指标
//! (帧内周期、划分深度、扩展块、qp 范围、码率、突发码率), 并通过统一的
//! 按名称查询接口提供给测试逻辑.
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use conform::codec::quantizer::qindex_to_qp;
//! use conform::core::Rational;
//!
//! let time_base = Rational::MILLI;
//! println!("时间基: {time_base}, qindex 128 -> qp {}", qindex_to_qp(128));
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `conform-core` | 错误类型、比特流读写、像素格式、时间基 |
//! | `conform-codec` | 引擎抽象、参考解码器适配层、帧统计、语法元素查询、序列头解析 |

/// 核心类型与工具
pub use conform_core as core;

/// 参考解码器与一致性分析
pub use conform_codec as codec;

pub mod logging;

/// 获取版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
