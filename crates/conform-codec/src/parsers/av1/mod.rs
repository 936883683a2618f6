//! AV1 码流解析器.
//!
//! 提供对 AV1 低开销 (size-delimited) OBU 码流的解析能力:
//! - OBU 分割与类型识别
//! - sequence_header_obu 解析
//! - 以语法元素名称查询序列头字段
//!
//! # OBU 头部 (1 字节, 可选 1 字节扩展)
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ forbidden(1) | type(4) | extension(1) | has_size(1) | rsv(1) │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod obu;
pub mod parser;
pub mod sequence;

pub use obu::{Obu, ObuHeader, ObuType, build_obu, split_obus};
pub use parser::SequenceHeaderParser;
pub use sequence::{ColorConfig, DecoderModelInfo, OperatingPoint, SequenceHeader, TimingInfo};
