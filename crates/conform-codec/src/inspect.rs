//! 帧检查数据 (inspection) 的类型定义.
//!
//! 解码器每完成一帧, 通过 [`InspectionSink`] 同步回调一次, 携带一份
//! [`FrameInspection`] 记录. 记录借用解码器内部缓冲区, 只在回调期间有效,
//! 需要保留的数据必须复制到 [`InspectionFrame`] 中.

use conform_core::{ConformError, ConformResult};
use log::warn;

/// mode-info 网格单元对应的像素边长
pub const MI_SIZE: u32 = 4;

/// 按图像分辨率计算 mi 网格尺寸 (行数, 列数)
///
/// 与解码器一致, 宽高先对齐到 8 像素再按 [`MI_SIZE`] 划分.
pub const fn mi_grid_dims(width: u32, height: u32) -> (u32, u32) {
    (height.next_multiple_of(8) / MI_SIZE, width.next_multiple_of(8) / MI_SIZE)
}

/// 帧类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameType {
    /// 关键帧
    #[default]
    Key,
    /// 帧间预测帧
    Inter,
    /// 仅帧内编码帧
    IntraOnly,
    /// 切换帧 (S 帧)
    Switch,
    /// 未知取值, 保留原始值
    Unknown(u8),
}

impl FrameType {
    /// 从解码器原始取值转换
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Key,
            1 => Self::Inter,
            2 => Self::IntraOnly,
            3 => Self::Switch,
            other => Self::Unknown(other),
        }
    }

    /// 是否为帧内边界 (关键帧或仅帧内帧)
    pub const fn is_intra(&self) -> bool {
        matches!(self, Self::Key | Self::IntraOnly)
    }

    /// 是否为帧间帧 (普通帧间帧或切换帧)
    pub const fn is_inter(&self) -> bool {
        matches!(self, Self::Inter | Self::Switch)
    }
}

/// 单个 mode-info 单元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MiInfo {
    /// 块尺寸枚举原始值
    pub block_size: u8,
    /// 该块的量化索引
    pub current_qindex: i32,
}

/// 解码器提供的单帧检查记录 (只读借用)
#[derive(Debug, Clone, Copy)]
pub struct FrameInspection<'a> {
    /// 帧类型
    pub frame_type: FrameType,
    /// 帧级基础量化索引
    pub base_qindex: u32,
    /// tile 行数 (mi 粒度)
    pub tile_mi_rows: u32,
    /// tile 列数 (mi 粒度)
    pub tile_mi_cols: u32,
    /// mi 网格行数
    pub mi_rows: u32,
    /// mi 网格列数
    pub mi_cols: u32,
    /// 行优先排列的 mi 网格
    pub mi_grid: &'a [MiInfo],
}

/// 检查回调接收方
///
/// 解码器在 `decode` 调用栈内为每个完成的帧调用一次 `on_frame`, 不可重入.
pub trait InspectionSink {
    /// 处理一帧检查记录
    fn on_frame(&mut self, record: &FrameInspection<'_>);
}

/// 检查数据缓冲区
///
/// 按码流分辨率一次性分配, 之后每帧原地覆盖.
#[derive(Debug, Clone)]
pub struct InspectionFrame {
    /// 容量: mi 行数
    max_mi_rows: u32,
    /// 容量: mi 列数
    max_mi_cols: u32,
    /// 当前帧类型
    pub frame_type: FrameType,
    /// 当前帧基础量化索引
    pub base_qindex: u32,
    /// 当前帧 tile 行数
    pub tile_mi_rows: u32,
    /// 当前帧 tile 列数
    pub tile_mi_cols: u32,
    /// 当前帧有效 mi 行数
    mi_rows: u32,
    /// 当前帧有效 mi 列数
    mi_cols: u32,
    /// mi 网格, 行优先, 行跨度为 `max_mi_cols`
    mi_grid: Vec<MiInfo>,
}

impl InspectionFrame {
    /// 按图像分辨率分配缓冲区
    pub fn new(width: u32, height: u32) -> ConformResult<Self> {
        if width == 0 || height == 0 {
            return Err(ConformError::InvalidParam(format!(
                "检查缓冲区分辨率无效: {}x{}",
                width, height
            )));
        }
        let (max_mi_rows, max_mi_cols) = mi_grid_dims(width, height);
        let cells = max_mi_cols as usize * max_mi_rows as usize;

        let mut mi_grid = Vec::new();
        mi_grid.try_reserve_exact(cells).map_err(|e| {
            ConformError::MemError(format!("检查缓冲区分配失败 ({} 个单元): {}", cells, e))
        })?;
        mi_grid.resize(cells, MiInfo::default());

        Ok(Self {
            max_mi_rows,
            max_mi_cols,
            frame_type: FrameType::default(),
            base_qindex: 0,
            tile_mi_rows: 0,
            tile_mi_cols: 0,
            mi_rows: 0,
            mi_cols: 0,
            mi_grid,
        })
    }

    /// 当前帧有效 mi 行数
    pub fn mi_rows(&self) -> u32 {
        self.mi_rows
    }

    /// 当前帧有效 mi 列数
    pub fn mi_cols(&self) -> u32 {
        self.mi_cols
    }

    /// 从检查记录复制一帧数据
    ///
    /// 只复制记录与缓冲区都覆盖到的区域, 记录声明的网格大于实际切片时按切片截断.
    /// 发生截断时输出警告.
    pub fn fill_from(&mut self, record: &FrameInspection<'_>) {
        self.frame_type = record.frame_type;
        self.base_qindex = record.base_qindex;
        self.tile_mi_rows = record.tile_mi_rows;
        self.tile_mi_cols = record.tile_mi_cols;

        let src_stride = record.mi_cols as usize;
        let available_rows = if src_stride == 0 {
            0
        } else {
            (record.mi_grid.len() / src_stride) as u32
        };
        if record.mi_rows > available_rows {
            warn!(
                "检查记录声明 {} 行 mi, 网格切片只有 {} 行",
                record.mi_rows, available_rows
            );
        }
        if record.mi_rows > self.max_mi_rows || record.mi_cols > self.max_mi_cols {
            warn!(
                "检查记录网格 {}x{} 超出缓冲区容量 {}x{}, 超出部分被忽略",
                record.mi_rows, record.mi_cols, self.max_mi_rows, self.max_mi_cols
            );
        }
        self.mi_rows = record.mi_rows.min(available_rows).min(self.max_mi_rows);
        self.mi_cols = record.mi_cols.min(self.max_mi_cols);

        let cols = self.mi_cols as usize;
        let dst_stride = self.max_mi_cols as usize;
        for row in 0..self.mi_rows as usize {
            let src = &record.mi_grid[row * src_stride..row * src_stride + cols];
            self.mi_grid[row * dst_stride..row * dst_stride + cols].copy_from_slice(src);
        }
    }

    /// 按行优先顺序遍历当前帧的有效单元
    pub fn cells(&self) -> impl Iterator<Item = &MiInfo> + '_ {
        let cols = self.mi_cols as usize;
        self.mi_grid
            .chunks(self.max_mi_cols as usize)
            .take(self.mi_rows as usize)
            .flat_map(move |row| &row[..cols])
    }
}
