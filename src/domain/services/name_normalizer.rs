// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

const PATH_SEPARATOR: char = '/';

/// 脚本名规范化
///
/// 把脚本引用缩减为可比较的文件名（最后一个路径段）
pub struct NameNormalizer;

impl NameNormalizer {
    /// 取最后一个 `/` 之后的部分；没有 `/` 时返回整个引用
    ///
    /// 不校验扩展名，附带的查询串原样保留
    pub fn normalize(reference: &str) -> &str {
        match reference.rfind(PATH_SEPARATOR) {
            Some(idx) => &reference[idx + PATH_SEPARATOR.len_utf8()..],
            None => reference,
        }
    }

    /// 脚本名是否以指定后缀结尾
    pub fn has_extension(name: &str, extension: &str) -> bool {
        name.ends_with(extension)
    }
}
