//! CSV 导出
//!
//! 所有字段统一加引号。已删除课程的评分仍会导出，课程列使用 `#<id>` 占位。

use actix_web::HttpResponse;
use csv::{QuoteStyle, Writer, WriterBuilder};

use crate::errors::{FeedbackError, Result};
use crate::models::stats::responses::SubjectSummary;
use crate::models::subjects::entities::Subject;
use crate::models::submissions::entities::Submission;

fn writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(vec![])
}

fn finish(wtr: Writer<Vec<u8>>) -> Result<Vec<u8>> {
    wtr.into_inner()
        .map_err(|e| FeedbackError::export(format!("CSV 生成失败: {e}")))
}

/// 课程汇总
pub fn summaries_csv(summaries: &[SubjectSummary]) -> Result<Vec<u8>> {
    let mut wtr = writer();
    wtr.write_record([
        "code",
        "name",
        "program",
        "semester",
        "teacher_id",
        "responses",
        "average",
    ])?;
    for summary in summaries {
        wtr.write_record([
            summary.code.clone(),
            summary.name.clone(),
            summary.program.to_string(),
            summary.semester.to_string(),
            summary.teacher_id.to_string(),
            summary.response_count.to_string(),
            summary.average_display.clone(),
        ])?;
    }
    finish(wtr)
}

/// 提交明细，每门课程一行
///
/// `reveal_anonymous` 为 false 时匿名提交的学生 ID 留空。
pub fn submissions_csv(
    submissions: &[Submission],
    subjects: &[Subject],
    reveal_anonymous: bool,
) -> Result<Vec<u8>> {
    let mut wtr = writer();
    wtr.write_record([
        "submission_id",
        "student_id",
        "program",
        "semester",
        "submitted_at",
        "subject",
        "rating",
        "comment",
    ])?;
    for submission in submissions {
        let student = if submission.anonymous && !reveal_anonymous {
            String::new()
        } else {
            submission.student_id.to_string()
        };
        for item in &submission.items {
            let subject = subjects
                .iter()
                .find(|s| s.id == item.subject_id)
                .map(|s| s.code.clone())
                .unwrap_or_else(|| format!("#{}", item.subject_id));
            wtr.write_record([
                submission.id.to_string(),
                student.clone(),
                submission.program.to_string(),
                submission.semester.to_string(),
                submission.submitted_at.to_rfc3339(),
                subject,
                item.rating.to_string(),
                item.comment.clone().unwrap_or_default(),
            ])?;
        }
    }
    finish(wtr)
}

pub fn csv_attachment(filename: &str, data: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::FeedbackItem;
    use crate::models::{Program, Semester};
    use chrono::{TimeZone, Utc};

    fn submission(anonymous: bool) -> Submission {
        Submission {
            id: 7,
            student_id: 101,
            program: Program::Mba,
            semester: Semester::I,
            anonymous,
            submitted_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            items: vec![
                FeedbackItem {
                    subject_id: 1,
                    rating: 5,
                    comment: Some("Great, \"practical\" lectures".into()),
                },
                FeedbackItem {
                    subject_id: 9,
                    rating: 3,
                    comment: None,
                },
            ],
        }
    }

    fn catalog() -> Vec<Subject> {
        vec![Subject {
            id: 1,
            code: "FIN101".into(),
            name: "Finance".into(),
            program: Program::Mba,
            semester: Semester::I,
            teacher_id: 10,
        }]
    }

    #[test]
    fn test_submissions_csv_quotes_and_orphans() {
        let data = submissions_csv(&[submission(false)], &catalog(), false).unwrap();
        let text = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("\"submission_id\",\"student_id\""));
        assert!(lines[1].contains("\"FIN101\""));
        assert!(lines[1].contains("\"Great, \"\"practical\"\" lectures\""));
        assert!(lines[2].contains("\"#9\""));
    }

    #[test]
    fn test_anonymous_rows_hide_student_id() {
        let text =
            String::from_utf8(submissions_csv(&[submission(true)], &catalog(), false).unwrap())
                .unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("\"7\",\"\","));

        let own =
            String::from_utf8(submissions_csv(&[submission(true)], &catalog(), true).unwrap())
                .unwrap();
        assert!(own.lines().nth(1).unwrap().starts_with("\"7\",\"101\","));
    }
}
