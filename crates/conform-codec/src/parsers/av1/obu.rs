//! OBU 头部解析与分割.

use conform_core::bitreader::BitReader;
use conform_core::bitwriter::BitWriter;
use conform_core::{ConformError, ConformResult};

/// OBU 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObuType {
    SequenceHeader,
    TemporalDelimiter,
    FrameHeader,
    TileGroup,
    Metadata,
    Frame,
    RedundantFrameHeader,
    TileList,
    Padding,
    /// 保留类型
    Reserved(u8),
}

impl ObuType {
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::SequenceHeader,
            2 => Self::TemporalDelimiter,
            3 => Self::FrameHeader,
            4 => Self::TileGroup,
            5 => Self::Metadata,
            6 => Self::Frame,
            7 => Self::RedundantFrameHeader,
            8 => Self::TileList,
            15 => Self::Padding,
            other => Self::Reserved(other),
        }
    }

    pub const fn raw(&self) -> u8 {
        match self {
            Self::SequenceHeader => 1,
            Self::TemporalDelimiter => 2,
            Self::FrameHeader => 3,
            Self::TileGroup => 4,
            Self::Metadata => 5,
            Self::Frame => 6,
            Self::RedundantFrameHeader => 7,
            Self::TileList => 8,
            Self::Padding => 15,
            Self::Reserved(raw) => *raw,
        }
    }
}

/// OBU 头部
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObuHeader {
    /// OBU 类型
    pub obu_type: ObuType,
    /// 是否带扩展头
    pub extension_flag: bool,
    /// 是否带 obu_size 字段
    pub has_size_field: bool,
    /// 时域层 ID (无扩展头时为 0)
    pub temporal_id: u8,
    /// 空域层 ID (无扩展头时为 0)
    pub spatial_id: u8,
}

impl ObuHeader {
    /// 解析 OBU 头部 (含扩展头)
    pub fn parse(br: &mut BitReader<'_>) -> ConformResult<Self> {
        if br.read_bit()? != 0 {
            return Err(ConformError::InvalidData("OBU: forbidden 位不为 0".into()));
        }
        let obu_type = ObuType::from_raw(br.read_bits(4)? as u8);
        let extension_flag = br.read_flag()?;
        let has_size_field = br.read_flag()?;
        br.skip_bits(1)?;

        let (temporal_id, spatial_id) = if extension_flag {
            let temporal_id = br.read_bits(3)? as u8;
            let spatial_id = br.read_bits(2)? as u8;
            br.skip_bits(3)?;
            (temporal_id, spatial_id)
        } else {
            (0, 0)
        };

        Ok(Self {
            obu_type,
            extension_flag,
            has_size_field,
            temporal_id,
            spatial_id,
        })
    }
}

/// 一个 OBU (借用原始数据)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obu<'a> {
    pub header: ObuHeader,
    /// OBU 负载 (不含头部与 obu_size)
    pub payload: &'a [u8],
}

/// 将一段低开销格式的数据分割为 OBU 列表
///
/// 没有 obu_size 字段的 OBU 占用剩余全部数据.
pub fn split_obus(data: &[u8]) -> ConformResult<Vec<Obu<'_>>> {
    let mut obus = Vec::new();
    let mut br = BitReader::new(data);

    while !br.is_eof() {
        let header = ObuHeader::parse(&mut br)?;
        let obu_size = if header.has_size_field {
            let size = br.read_leb128()?;
            if size > u64::from(u32::MAX) {
                return Err(ConformError::InvalidData(format!(
                    "OBU: obu_size {} 超过 32 位",
                    size
                )));
            }
            size as usize
        } else {
            br.bits_left() / 8
        };

        let payload = br.read_bytes(obu_size).map_err(|_| {
            ConformError::InvalidData(format!(
                "OBU: {:?} 声明 {} 字节, 剩余数据不足",
                header.obu_type, obu_size
            ))
        })?;
        obus.push(Obu { header, payload });
    }

    Ok(obus)
}

/// 按低开销格式封装一个 OBU (带 obu_size, 无扩展头)
pub fn build_obu(obu_type: ObuType, payload: &[u8]) -> Vec<u8> {
    let mut bw = BitWriter::new();
    bw.write_bit(0);
    bw.write_bits(u32::from(obu_type.raw()), 4);
    bw.write_flag(false);
    bw.write_flag(true);
    bw.write_bit(0);
    bw.write_leb128(payload.len() as u64);
    bw.write_bytes(payload);
    bw.finish()
}
