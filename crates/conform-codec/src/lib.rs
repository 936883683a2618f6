//! # conform-codec
//!
//! AV1 码流一致性分析库, 构建在外部 AV1 解码引擎之上.
//!
//! 本 crate 不实现解码算法, 而是通过 [`Av1Engine`] 驱动引擎, 消费引擎逐帧给出的
//! 检查记录 (帧类型、块划分、量化索引、tile 布局), 汇总为一组一致性测试指标,
//! 并以统一的按名称查询接口对外提供.
//!
//! ## 组成
//!
//! - **块分类工具**: 块尺寸枚举、最小边长、划分深度、qindex 到 qp 的映射
//! - **帧统计累加器**: 逐帧折叠检查记录
//! - **语法元素查询**: 解析器优先, 其次为派生指标表
//! - **参考解码器适配层**: [`RefDecoder`]
//! - **序列头解析器**: OBU 分割与 sequence_header_obu 解析
//!
//! ## 使用示例
//!
//! ```rust
//! use conform_codec::block::{BlockSize, partition_depth};
//! use conform_codec::quantizer::qindex_to_qp;
//!
//! assert_eq!(partition_depth(BlockSize::Block16x8.min_side_length()), Some(3));
//! assert_eq!(qindex_to_qp(255), 63);
//! ```

pub mod block;
pub mod engine;
pub mod frame;
pub mod inspect;
pub mod parsers;
pub mod quantizer;
pub mod ref_decoder;
pub mod stats;
pub mod syntax;

// 重导出常用类型
pub use block::BlockSize;
pub use engine::{Av1Engine, EngineError, EngineErrorKind, EngineImage, EngineImageFormat};
pub use frame::VideoFrame;
pub use inspect::{FrameInspection, FrameType, InspectionFrame, InspectionSink, MiInfo};
pub use parsers::av1::SequenceHeaderParser;
pub use ref_decoder::{RefDecoder, RefDecoderConfig, SessionState, create_reference_decoder};
pub use stats::{FrameStatsAccumulator, InspectParams};
pub use syntax::{SyntaxResolver, SyntaxSource};
