use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student, // 学生
    Teacher, // 教师
    Parent,  // 家长
    Admin,   // 管理员
}

impl Role {
    pub const STUDENT: &'static str = "STUDENT";
    pub const TEACHER: &'static str = "TEACHER";
    pub const PARENT: &'static str = "PARENT";
    pub const ADMIN: &'static str = "ADMIN";

    pub fn all_roles() -> &'static [Role] {
        &[Role::Student, Role::Teacher, Role::Parent, Role::Admin]
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Role>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: STUDENT, TEACHER, PARENT, ADMIN"
            ))
        })
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "{}", Role::STUDENT),
            Role::Teacher => write!(f, "{}", Role::TEACHER),
            Role::Parent => write!(f, "{}", Role::PARENT),
            Role::Admin => write!(f, "{}", Role::ADMIN),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Role::STUDENT => Ok(Role::Student),
            Role::TEACHER => Ok(Role::Teacher),
            Role::PARENT => Ok(Role::Parent),
            Role::ADMIN => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

// 性别
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Gender>().map_err(|_| {
            serde::de::Error::custom(format!("无效的性别: '{s}'. 支持的值: MALE, FEMALE, OTHER"))
        })
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "MALE"),
            Gender::Female => write!(f, "FEMALE"),
            Gender::Other => write!(f, "OTHER"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            "OTHER" => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub gender: Option<Gender>,
    pub birth_date: Option<DateTime<Utc>>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 姓名，名在前
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_strings() {
        for role in Role::all_roles() {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), *role);
        }
        assert!("student".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        let err = serde_json::from_str::<Role>(r#""JANITOR""#).unwrap_err();
        assert!(err.to_string().contains("无效的用户角色"));
        assert_eq!(
            serde_json::from_str::<Gender>(r#""FEMALE""#).unwrap(),
            Gender::Female
        );
    }
}
