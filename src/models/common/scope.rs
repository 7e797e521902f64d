//! 专业与学期：所有课程、学生与提交都按这两个维度划分

use serde::{Deserialize, Serialize};

/// 专业（学位方向）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Program {
    #[serde(rename = "MBA")]
    Mba,
    #[serde(rename = "MCA")]
    Mca,
}

impl Program {
    pub const MBA: &'static str = "MBA";
    pub const MCA: &'static str = "MCA";

    pub fn all() -> [Program; 2] {
        [Program::Mba, Program::Mca]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Mba => Self::MBA,
            Program::Mca => Self::MCA,
        }
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Program::MBA => Ok(Program::Mba),
            Program::MCA => Ok(Program::Mca),
            _ => Err(format!("Invalid program: {s}")),
        }
    }
}

/// 学期，按先后顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Semester {
    I,
    II,
    III,
    IV,
}

impl Semester {
    pub fn all() -> [Semester; 4] {
        [Semester::I, Semester::II, Semester::III, Semester::IV]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::I => "I",
            Semester::II => "II",
            Semester::III => "III",
            Semester::IV => "IV",
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Semester::I),
            "II" => Ok(Semester::II),
            "III" => Ok(Semester::III),
            "IV" => Ok(Semester::IV),
            _ => Err(format!("Invalid semester: {s}")),
        }
    }
}

/// 提交的身份键：学生 + 专业 + 学期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionKey {
    pub student_id: i64,
    pub program: Program,
    pub semester: Semester,
}

impl SubmissionKey {
    pub fn new(student_id: i64, program: Program, semester: Semester) -> Self {
        Self {
            student_id,
            program,
            semester,
        }
    }

    /// 草稿快照使用的缓存键
    pub fn snapshot_key(&self) -> String {
        format!(
            "draft:{}:{}:{}",
            self.student_id, self.program, self.semester
        )
    }
}
