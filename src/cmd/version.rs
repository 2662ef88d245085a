use crate::command_registry::APP_NAME;

/// 版本字符串
pub fn version_line() -> String {
    format!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"))
}

/// 显示版本信息
pub fn handle_version_command() {
    println!("{}", version_line());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        assert!(version_line().starts_with("hotel-listing "));
    }
}
