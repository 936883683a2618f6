//! 比特流写入器.
//!
//! 按大端位序写入, 与 [`BitReader`](crate::bitreader::BitReader) 对应.
//! 主要用于构造 OBU 测试数据.

/// 比特流写入器
///
/// # 示例
/// ```
/// use conform_core::bitwriter::BitWriter;
///
/// // 序列头开头: seq_profile=0, still_picture=0, reduced_still_picture_header=1, seq_level_idx=5
/// let mut bw = BitWriter::new();
/// bw.write_bits(0, 3);
/// bw.write_flag(false);
/// bw.write_flag(true);
/// bw.write_bits(5, 5);
/// assert_eq!(bw.finish(), vec![0b0000_1001, 0b0100_0000]);
/// ```
#[derive(Debug, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    /// 已写入的总位数, 末字节未写满的低位保持为 0
    len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bits_written(&self) -> usize {
        self.len
    }

    /// 写入单个位, 只取 `bit` 的最低位
    pub fn write_bit(&mut self, bit: u32) {
        if self.len % 8 == 0 {
            self.data.push(0);
        }
        if bit & 1 == 1 {
            if let Some(last) = self.data.last_mut() {
                *last |= 0x80 >> (self.len % 8);
            }
        }
        self.len += 1;
    }

    pub fn write_flag(&mut self, flag: bool) {
        self.write_bit(u32::from(flag));
    }

    /// `f(n)`: 写入 `value` 的低 n 位, 高位在前
    pub fn write_bits(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32, "write_bits: 单次最多 32 位, 请求 {} 位", n);
        (0..n).rev().for_each(|i| self.write_bit(value >> i));
    }

    /// `uvlc()`
    pub fn write_uvlc(&mut self, value: u32) {
        let coded = u64::from(value) + 1;
        let width = 63 - coded.leading_zeros();
        self.write_bits(0, width);
        self.write_bit(1);
        self.write_bits((coded - (1u64 << width)) as u32, width);
    }

    /// `leb128()`: 先补齐到字节边界
    pub fn write_leb128(&mut self, mut value: u64) {
        self.align_to_byte();
        loop {
            let low = (value & 0x7F) as u8;
            value >>= 7;
            let more = value != 0;
            self.write_bytes(&[low | if more { 0x80 } else { 0 }]);
            if !more {
                break;
            }
        }
    }

    /// 追加原始字节, 先补齐到字节边界
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.align_to_byte();
        self.data.extend_from_slice(bytes);
        self.len += bytes.len() * 8;
    }

    /// 以 0 补齐到字节边界
    pub fn align_to_byte(&mut self) {
        self.len = self.len.next_multiple_of(8);
    }

    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}
