//! 语法元素查询.
//!
//! 查询按优先级依次尝试:
//! 1. 码流头解析器 ([`SyntaxSource`]) 给出的非空结果直接采用;
//! 2. 按名称在派生指标表中查找, 由帧统计与字节计数计算;
//! 3. 都不支持时返回空字符串并输出诊断.

use log::warn;

use crate::block::partition_depth;
use crate::inspect::FrameType;
use crate::quantizer::qindex_to_qp;
use crate::stats::InspectParams;

/// 码流头解析器 (语法元素来源)
pub trait SyntaxSource {
    /// 送入原始 OBU 数据
    fn input_obu_data(&mut self, data: &[u8]);

    /// 按名称查询语法元素, 不支持或未知时返回空字符串
    fn get_syntax_element(&self, name: &str) -> String;
}

/// 派生指标的计算输入
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// 帧统计
    pub params: &'a InspectParams,
    /// 累计输入字节数
    pub encoded_bytes: u64,
    /// 单次输入的最大字节数
    pub burst_bytes: u64,
    /// 已取出的帧数
    pub decoded_frames: u32,
}

type DeriveFn = fn(&ResolveContext<'_>) -> String;
type DeriveIndexedFn = fn(&ResolveContext<'_>, usize) -> String;

/// 派生指标表, 按名称匹配
const DERIVED: &[(&str, DeriveFn)] = &[
    ("intra_period_length", derive_intra_period_length),
    ("tile_columns", derive_tile_columns),
    ("tile_rows", derive_tile_rows),
    ("partition_depth", derive_partition_depth),
    ("ext_block_flag", derive_ext_block_flag),
    ("qp", derive_max_qp),
    ("max_qp_allowed", derive_max_qp),
    ("min_qp_allowed", derive_min_qp),
    ("target_bit_rate", derive_target_bit_rate),
    ("burst_bit_per_frame", derive_burst_bit_per_frame),
];

/// 带索引的派生指标表
const DERIVED_INDEXED: &[(&str, DeriveIndexedFn)] = &[("use_qp_file", derive_frame_qp)];

fn derive_intra_period_length(ctx: &ResolveContext<'_>) -> String {
    intra_period_length(&ctx.params.frame_type_list).to_string()
}

fn derive_tile_columns(ctx: &ResolveContext<'_>) -> String {
    ctx.params.tile_cols.to_string()
}

fn derive_tile_rows(ctx: &ResolveContext<'_>) -> String {
    ctx.params.tile_rows.to_string()
}

fn derive_partition_depth(ctx: &ResolveContext<'_>) -> String {
    partition_depth(ctx.params.min_block_size)
        .map(|d| d.to_string())
        .unwrap_or_default()
}

fn derive_ext_block_flag(ctx: &ResolveContext<'_>) -> String {
    u32::from(ctx.params.ext_block_flag).to_string()
}

fn derive_max_qp(ctx: &ResolveContext<'_>) -> String {
    qindex_to_qp(ctx.params.max_qindex).to_string()
}

fn derive_min_qp(ctx: &ResolveContext<'_>) -> String {
    qindex_to_qp(ctx.params.min_qindex).to_string()
}

/// 平均每帧比特数, 未取出任何帧时查询属于调用方违约
fn derive_target_bit_rate(ctx: &ResolveContext<'_>) -> String {
    if ctx.decoded_frames == 0 {
        panic!("尚未取出任何帧, 无法计算 target_bit_rate");
    }
    (ctx.encoded_bytes * 8 / u64::from(ctx.decoded_frames)).to_string()
}

fn derive_burst_bit_per_frame(ctx: &ResolveContext<'_>) -> String {
    (ctx.burst_bytes * 8).to_string()
}

fn derive_frame_qp(ctx: &ResolveContext<'_>, index: usize) -> String {
    match ctx.params.qindex_list.get(index) {
        Some(&qindex) => qindex_to_qp(qindex).to_string(),
        None => panic!(
            "use_qp_file 索引 {} 越界 (共 {} 帧)",
            index,
            ctx.params.qindex_list.len()
        ),
    }
}

/// 计算帧内周期长度
///
/// 统计两个帧内边界 (关键帧 / 仅帧内帧) 之间连续帧间帧的最大个数,
/// 计数在每个帧内边界处结算并清零, 最后一个帧内边界之后的尾部不计入.
/// 最大值为 0 时返回 -1, 表示无法确定周期.
pub fn intra_period_length(frame_types: &[FrameType]) -> i64 {
    let mut period_max = 0i64;
    let mut period = 0i64;
    for frame_type in frame_types {
        match frame_type {
            FrameType::Key | FrameType::IntraOnly => {
                period_max = period_max.max(period);
                period = 0;
            }
            FrameType::Inter | FrameType::Switch => period += 1,
            FrameType::Unknown(raw) => warn!("未知的帧类型: {}", raw),
        }
    }
    if period_max == 0 { -1 } else { period_max }
}

/// 语法元素查询器
pub struct SyntaxResolver<'a> {
    parser: Option<&'a dyn SyntaxSource>,
    ctx: ResolveContext<'a>,
}

impl<'a> SyntaxResolver<'a> {
    pub fn new(parser: Option<&'a dyn SyntaxSource>, ctx: ResolveContext<'a>) -> Self {
        Self { parser, ctx }
    }

    /// 按名称查询
    pub fn get(&self, name: &str) -> String {
        if let Some(parser) = self.parser {
            let value = parser.get_syntax_element(name);
            if !value.is_empty() {
                return value;
            }
        }

        match DERIVED.iter().find(|(n, _)| *n == name) {
            Some((_, derive)) => derive(&self.ctx),
            None => {
                warn!("暂不支持的语法元素: {}", name);
                String::new()
            }
        }
    }

    /// 按名称与索引查询 (逐帧指标)
    pub fn get_at(&self, name: &str, index: usize) -> String {
        match DERIVED_INDEXED.iter().find(|(n, _)| *n == name) {
            Some((_, derive)) => derive(&self.ctx, index),
            None => {
                warn!("暂不支持的逐帧语法元素: {}[{}]", name, index);
                String::new()
            }
        }
    }
}
