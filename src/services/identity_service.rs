//! 匿名身份服务 - 业务能力层
//!
//! 为每个会话生成"颜色 + 动物"形式的显示名

use rand::seq::SliceRandom;
use rand::Rng;

const COLORS: [&str; 10] = [
    "Red", "Blue", "Green", "Purple", "Golden", "Silver", "Orange", "Teal", "Emerald", "Azure",
];

const ANIMALS: [&str; 10] = [
    "Dolphin", "Penguin", "Tiger", "Elephant", "Koala", "Flamingo", "Panda", "Zebra", "Fox", "Owl",
];

/// 生成匿名身份（使用线程本地随机数）
pub fn generate_author_label() -> String {
    generate_author_label_with(&mut rand::thread_rng())
}

/// 生成匿名身份
///
/// # 参数
/// - `rng`: 随机数来源，测试时可传入固定种子
pub fn generate_author_label_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let color = COLORS.choose(rng).copied().unwrap_or(COLORS[0]);
    let animal = ANIMALS.choose(rng).copied().unwrap_or(ANIMALS[0]);
    format!("{} {}", color, animal)
}
