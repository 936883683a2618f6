//! 比特流读取器.
//!
//! 按大端位序 (MSB first) 读取, 提供 AV1 语法描述符 `f(n)`, `uvlc()`,
//! `leb128()` 对应的读取方法. 内部只维护一个绝对位偏移.

use crate::{ConformError, ConformResult};

/// 比特流读取器
///
/// # 示例
/// ```
/// use conform_core::bitreader::BitReader;
///
/// // OBU 头: forbidden=0, type=1 (序列头), extension=0, has_size=1
/// let mut br = BitReader::new(&[0x0A, 0x0B]);
/// assert_eq!(br.read_bits(1).unwrap(), 0);
/// assert_eq!(br.read_bits(4).unwrap(), 1);
/// assert!(!br.read_flag().unwrap());
/// assert!(br.read_flag().unwrap());
/// br.align_to_byte();
/// assert_eq!(br.read_leb128().unwrap(), 11);
/// ```
pub struct BitReader<'a> {
    data: &'a [u8],
    /// 下一个待读位的绝对偏移
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// 已消耗的位数
    pub fn bits_read(&self) -> usize {
        self.pos
    }

    /// 剩余位数
    pub fn bits_left(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.pos)
    }

    pub fn is_eof(&self) -> bool {
        self.bits_left() == 0
    }

    fn is_aligned(&self) -> bool {
        self.pos % 8 == 0
    }

    /// 读取单个位
    pub fn read_bit(&mut self) -> ConformResult<u32> {
        let byte = *self.data.get(self.pos / 8).ok_or(ConformError::Eof)?;
        let bit = (byte >> (7 - self.pos % 8)) & 1;
        self.pos += 1;
        Ok(u32::from(bit))
    }

    pub fn read_flag(&mut self) -> ConformResult<bool> {
        self.read_bit().map(|b| b == 1)
    }

    /// `f(n)`: 读取 n 位无符号数, n 不超过 32
    pub fn read_bits(&mut self, n: u32) -> ConformResult<u32> {
        if n > 32 {
            return Err(ConformError::InvalidParam(format!(
                "read_bits: 单次最多 32 位, 请求 {} 位",
                n
            )));
        }
        self.read_bits_u64(n).map(|v| v as u32)
    }

    /// 读取 n 位无符号数, n 不超过 64
    pub fn read_bits_u64(&mut self, n: u32) -> ConformResult<u64> {
        if n > 64 {
            return Err(ConformError::InvalidParam(format!(
                "read_bits_u64: 单次最多 64 位, 请求 {} 位",
                n
            )));
        }
        if n as usize > self.bits_left() {
            return Err(ConformError::Eof);
        }

        let mut value = 0u64;
        let mut left = n;
        while left > 0 {
            // 当前字节内还能取多少位
            let offset = (self.pos % 8) as u32;
            let take = left.min(8 - offset);
            let byte = u64::from(self.data[self.pos / 8]);
            let chunk = (byte >> (8 - offset - take)) & ((1u64 << take) - 1);
            value = (value << take) | chunk;
            self.pos += take as usize;
            left -= take;
        }
        Ok(value)
    }

    /// `uvlc()`: 前导零个数达到 32 时按规范返回 `u32::MAX`
    pub fn read_uvlc(&mut self) -> ConformResult<u32> {
        let mut leading_zeros = 0u32;
        while !self.read_flag()? {
            leading_zeros += 1;
        }
        if leading_zeros >= 32 {
            return Ok(u32::MAX);
        }
        let suffix = self.read_bits(leading_zeros)?;
        Ok(suffix + ((1u32 << leading_zeros) - 1))
    }

    /// `leb128()`: 要求字节对齐, 最多 8 字节
    pub fn read_leb128(&mut self) -> ConformResult<u64> {
        if !self.is_aligned() {
            return Err(ConformError::InvalidParam("leb128 必须从字节边界开始".into()));
        }
        let mut value = 0u64;
        for i in 0..8 {
            let byte = self.read_bits(8)?;
            value |= u64::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(ConformError::InvalidData("leb128 超过 8 字节".into()))
    }

    pub fn skip_bits(&mut self, n: u32) -> ConformResult<()> {
        if n as usize > self.bits_left() {
            return Err(ConformError::Eof);
        }
        self.pos += n as usize;
        Ok(())
    }

    /// 跳到下一个字节边界, 已对齐时不动
    pub fn align_to_byte(&mut self) {
        self.pos = self.pos.next_multiple_of(8);
    }

    /// 当前所在字节的下标
    pub fn byte_position(&self) -> usize {
        self.pos / 8
    }

    /// 借出接下来的 n 个字节, 要求字节对齐
    pub fn read_bytes(&mut self, n: usize) -> ConformResult<&'a [u8]> {
        if !self.is_aligned() {
            return Err(ConformError::InvalidParam("read_bytes 必须从字节边界开始".into()));
        }
        let start = self.pos / 8;
        let bytes = self.data.get(start..start + n).ok_or(ConformError::Eof)?;
        self.pos += n * 8;
        Ok(bytes)
    }
}
