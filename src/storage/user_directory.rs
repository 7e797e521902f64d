//! 演示用户目录
//!
//! 用户只用于选择视图和限定查询范围，启动时写入固定的演示数据，运行期间只读。

use crate::models::users::entities::{User, UserRole};
use crate::models::{Program, Semester};

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// 演示数据：管理员、协调员、两名教师，以及 MBA/MCA 各学期的学生
    pub fn demo() -> Self {
        let staff = |id: i64, name: &str, email: &str, role: UserRole| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            program: None,
            semester: None,
            role,
        };
        let student = |id: i64, name: &str, program: Program, semester: Semester| User {
            id,
            name: name.to_string(),
            email: format!("student{id}@campus.example.edu"),
            program: Some(program),
            semester: Some(semester),
            role: UserRole::Student,
        };

        Self::new(vec![
            staff(1, "Asha Menon", "admin@campus.example.edu", UserRole::Admin),
            staff(2, "Rahul Iyer", "coordinator@campus.example.edu", UserRole::Coordinator),
            staff(10, "Dr. Kavita Rao", "k.rao@campus.example.edu", UserRole::Teacher),
            staff(11, "Prof. Daniel Costa", "d.costa@campus.example.edu", UserRole::Teacher),
            student(101, "Priya Nair", Program::Mba, Semester::I),
            student(102, "Arjun Das", Program::Mba, Semester::I),
            student(103, "Meera Pillai", Program::Mba, Semester::II),
            student(201, "Vikram Shah", Program::Mca, Semester::I),
            student(202, "Neha Gupta", Program::Mca, Semester::III),
        ])
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn by_role(&self, role: UserRole) -> Vec<&User> {
        self.users.iter().filter(|u| u.role == role).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_directory_covers_every_role() {
        let directory = UserDirectory::demo();
        for role in [
            UserRole::Admin,
            UserRole::Coordinator,
            UserRole::Teacher,
            UserRole::Student,
        ] {
            assert!(!directory.by_role(role).is_empty(), "missing {role}");
        }
    }

    #[test]
    fn test_students_have_scope_and_staff_do_not() {
        let directory = UserDirectory::demo();
        for user in directory.all() {
            let scoped = user.program.is_some() && user.semester.is_some();
            assert_eq!(scoped, user.role == UserRole::Student, "user {}", user.id);
        }
        assert_eq!(directory.get(10).map(|u| u.role), Some(UserRole::Teacher));
        assert!(directory.get(999).is_none());
    }
}
