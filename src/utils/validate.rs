use once_cell::sync::Lazy;
use regex::Regex;

static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid subject code regex"));

/// 课程名称上限（字符数）
const MAX_SUBJECT_NAME_CHARS: usize = 120;

pub fn validate_subject_code(code: &str) -> Result<(), &'static str> {
    // 课程代码长度校验：2 <= x <= 16
    if code.len() < 2 || code.len() > 16 {
        return Err("Subject code length must be between 2 and 16 characters");
    }
    // 课程代码格式校验：只能包含字母、数字、下划线或连字符
    if !SUBJECT_CODE_RE.is_match(code) {
        return Err("Subject code must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_subject_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Subject name must not be empty");
    }
    if name.chars().count() > MAX_SUBJECT_NAME_CHARS {
        return Err("Subject name must be at most 120 characters");
    }
    Ok(())
}
