//! 码流解析器.
//!
//! 独立于解码引擎, 直接从原始 OBU 数据中提取语法元素, 作为语法元素查询的首选来源.

pub mod av1;
