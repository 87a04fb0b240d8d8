/// 管理模式口令校验
///
/// 只做一次静态口令比较，不是真正的身份认证。
#[derive(Clone)]
pub struct ModeratorGate {
    passphrase: String,
}

impl ModeratorGate {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// 校验输入的口令（忽略行尾换行）
    pub fn verify(&self, input: &str) -> bool {
        let input = input.trim_end_matches(['\r', '\n']);
        !self.passphrase.is_empty() && input == self.passphrase
    }
}

impl std::fmt::Debug for ModeratorGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ModeratorGate(***)")
    }
}
