//! 序列头语法元素来源.

use log::{debug, warn};

use super::obu::{ObuType, split_obus};
use super::sequence::SequenceHeader;
use crate::syntax::SyntaxSource;

/// 从 OBU 数据中提取序列头语法元素
///
/// 每次输入的数据都会被完整扫描, 以最后一个合法的序列头为准.
/// 不回答派生指标 (例如 `qp`), 这些名称交由解码适配器计算.
#[derive(Debug, Default)]
pub struct SequenceHeaderParser {
    header: Option<SequenceHeader>,
    parsed_headers: u32,
}

impl SequenceHeaderParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前生效的序列头
    pub fn sequence_header(&self) -> Option<&SequenceHeader> {
        self.header.as_ref()
    }

    /// 已成功解析的序列头数量
    pub fn parsed_headers(&self) -> u32 {
        self.parsed_headers
    }
}

impl SyntaxSource for SequenceHeaderParser {
    fn input_obu_data(&mut self, data: &[u8]) {
        let obus = match split_obus(data) {
            Ok(obus) => obus,
            Err(e) => {
                warn!("OBU 分割失败, 忽略本次输入 ({} 字节): {}", data.len(), e);
                return;
            }
        };

        for obu in obus
            .iter()
            .filter(|obu| obu.header.obu_type == ObuType::SequenceHeader)
        {
            match SequenceHeader::parse(obu.payload) {
                Ok(sh) => {
                    if self.header.as_ref() != Some(&sh) {
                        debug!(
                            "序列头更新: profile={}, {}x{}, bit_depth={}",
                            sh.seq_profile,
                            sh.max_frame_width(),
                            sh.max_frame_height(),
                            sh.color_config.bit_depth,
                        );
                    }
                    self.header = Some(sh);
                    self.parsed_headers += 1;
                }
                Err(e) => warn!("序列头解析失败, 已跳过: {}", e),
            }
        }
    }

    fn get_syntax_element(&self, name: &str) -> String {
        self.header
            .as_ref()
            .and_then(|sh| sh.syntax_element(name))
            .unwrap_or_default()
    }
}
