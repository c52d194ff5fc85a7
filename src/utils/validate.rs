use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}(-\d{4})?$").expect("Invalid academic year regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线、点或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores, dots or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 学年格式：`2024` 或 `2024-2025`
pub fn validate_academic_year(year: &str) -> Result<(), &'static str> {
    if !ACADEMIC_YEAR_RE.is_match(year) {
        return Err("Academic year must look like 2024 or 2024-2025");
    }
    Ok(())
}

/// 必填文本不能为空白
pub fn validate_required(field: &'static str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

/// 分数、时长等数值不能为负
pub fn validate_non_negative(field: &'static str, value: f64) -> Result<(), String> {
    if value.is_nan() || value < 0.0 {
        return Err(format!("{field} must be a non-negative number"));
    }
    Ok(())
}
