//! Codec 错误类型

use contracts::{SensorTag, ValueShape};
use thiserror::Error;

/// Codec 错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// 字段值形态与 registry 不符
    #[error("field '{}' shape mismatch: expected {expected:?}, got {got:?}", tag.label())]
    ShapeMismatch {
        /// 字段标签
        tag: SensorTag,
        /// registry 规定的形态
        expected: ValueShape,
        /// 实际传入的形态
        got: ValueShape,
    },

    /// 编码结果超出单字节长度前缀的表示范围
    #[error("encoded packet is {len} bytes, exceeds the 255-byte length prefix")]
    PacketTooLong {
        /// 实际编码长度
        len: usize,
    },

    /// 数据不完整
    #[error("truncated packet: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// 还需要的字节数
        needed: usize,
        /// 剩余字节数
        remaining: usize,
    },

    /// 长度前缀与实际长度不符
    #[error("length mismatch: declared {declared}, actual {actual}")]
    LengthMismatch {
        /// 长度字节声明的值
        declared: usize,
        /// 缓冲区实际长度
        actual: usize,
    },

    /// 未注册的字段标签
    #[error("unknown field tag 0x{raw:02X}")]
    UnknownTag {
        /// 原始标签字节
        raw: u8,
    },
}

/// Codec Result 类型别名
pub type Result<T> = std::result::Result<T, CodecError>;
