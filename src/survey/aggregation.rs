//! 汇总统计
//!
//! 全部为纯函数：输入课程目录与提交列表，输出每门课程的评分均值、
//! 回复数和评论，以及不区分专业学期的全局评分分布。

use crate::models::stats::responses::{
    CommentEntry, CompletionStats, RatingHistogram, SubjectSummary,
};
use crate::models::subjects::entities::Subject;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::{User, UserRole};
use crate::models::{Program, Semester};

/// 均值，空集合返回 0
pub fn average(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.iter().map(|r| *r as u32).sum();
    sum as f64 / ratings.len() as f64
}

/// 保留两位小数
pub fn format_average(value: f64) -> String {
    format!("{value:.2}")
}

/// 某门课程在指定专业学期下的 (回复数, 均值)
pub fn subject_stats(
    subject_id: i64,
    submissions: &[Submission],
    program: Program,
    semester: Semester,
) -> (usize, f64) {
    let ratings: Vec<u8> = submissions
        .iter()
        .filter(|s| s.in_scope(program, semester))
        .flat_map(|s| s.items.iter())
        .filter(|item| item.subject_id == subject_id)
        .map(|item| item.rating)
        .collect();
    (ratings.len(), average(&ratings))
}

/// 单门课程汇总
///
/// 评论按存储的遍历顺序收集（存储保持最新在前），只保留前 `max_comments` 条非空评论。
pub fn summarize_subject(
    subject: &Subject,
    submissions: &[Submission],
    program: Program,
    semester: Semester,
    max_comments: usize,
) -> SubjectSummary {
    let (response_count, average_rating) = subject_stats(subject.id, submissions, program, semester);

    let comments = submissions
        .iter()
        .filter(|s| s.in_scope(program, semester))
        .filter_map(|s| {
            s.item_for(subject.id)
                .and_then(|item| item.non_empty_comment())
                .map(|comment| CommentEntry {
                    comment: comment.to_string(),
                    submitted_at: s.submitted_at,
                })
        })
        .take(max_comments)
        .collect();

    SubjectSummary {
        subject_id: subject.id,
        code: subject.code.clone(),
        name: subject.name.clone(),
        program: subject.program,
        semester: subject.semester,
        teacher_id: subject.teacher_id,
        response_count,
        average_rating,
        average_display: format_average(average_rating),
        comments,
    }
}

/// 指定专业学期内所有课程的汇总，顺序与目录一致
pub fn summarize_scope(
    subjects: &[Subject],
    submissions: &[Submission],
    program: Program,
    semester: Semester,
    max_comments: usize,
) -> Vec<SubjectSummary> {
    subjects
        .iter()
        .filter(|subject| subject.in_scope(program, semester))
        .map(|subject| summarize_subject(subject, submissions, program, semester, max_comments))
        .collect()
}

/// 教师视角：只包含本人课程，每门课程在其自身专业学期内统计
pub fn summarize_teacher(
    teacher_id: i64,
    subjects: &[Subject],
    submissions: &[Submission],
    max_comments: usize,
) -> Vec<SubjectSummary> {
    subjects
        .iter()
        .filter(|subject| subject.teacher_id == teacher_id)
        .map(|subject| {
            summarize_subject(
                subject,
                submissions,
                subject.program,
                subject.semester,
                max_comments,
            )
        })
        .collect()
}

/// 全部提交中 1-5 分的出现次数
pub fn rating_histogram(submissions: &[Submission]) -> RatingHistogram {
    let mut histogram = RatingHistogram::default();
    for item in submissions.iter().flat_map(|s| s.items.iter()) {
        if (1..=5).contains(&item.rating) {
            histogram.buckets[(item.rating - 1) as usize] += 1;
        }
    }
    histogram
}

/// 专业学期内已提交学生数 / 学生总数
pub fn completion(
    users: &[User],
    submissions: &[Submission],
    program: Program,
    semester: Semester,
) -> CompletionStats {
    let students = students_in_scope(users, program, semester);
    let submitted = students
        .iter()
        .filter(|student| {
            submissions
                .iter()
                .any(|s| s.student_id == student.id && s.in_scope(program, semester))
        })
        .count();

    CompletionStats {
        submitted,
        total_students: students.len(),
    }
}

/// 专业学期内尚未提交的学生
pub fn pending_students<'a>(
    users: &'a [User],
    submissions: &[Submission],
    program: Program,
    semester: Semester,
) -> Vec<&'a User> {
    students_in_scope(users, program, semester)
        .into_iter()
        .filter(|student| {
            !submissions
                .iter()
                .any(|s| s.student_id == student.id && s.in_scope(program, semester))
        })
        .collect()
}

fn students_in_scope(users: &[User], program: Program, semester: Semester) -> Vec<&User> {
    users
        .iter()
        .filter(|u| {
            u.role == UserRole::Student
                && u.program == Some(program)
                && u.semester == Some(semester)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::FeedbackItem;
    use chrono::{Duration, TimeZone, Utc};

    fn subject(id: i64, program: Program, semester: Semester) -> Subject {
        Subject {
            id,
            code: format!("S{id}"),
            name: format!("Subject {id}"),
            program,
            semester,
            teacher_id: 10 + id % 2,
        }
    }

    fn submission(id: i64, student_id: i64, items: Vec<(i64, u8, Option<&str>)>) -> Submission {
        Submission {
            id,
            student_id,
            program: Program::Mba,
            semester: Semester::I,
            anonymous: false,
            submitted_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(id),
            items: items
                .into_iter()
                .map(|(subject_id, rating, comment)| FeedbackItem {
                    subject_id,
                    rating,
                    comment: comment.map(str::to_string),
                })
                .collect(),
        }
    }

    #[test]
    fn test_average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(format_average(average(&[])), "0.00");
    }

    #[test]
    fn test_average_formatting() {
        let avg = average(&[5, 3, 4]);
        assert_eq!(avg, 4.0);
        assert_eq!(format_average(avg), "4.00");
        assert_eq!(format_average(average(&[5, 4])), "4.50");
    }

    #[test]
    fn test_summary_counts_only_matching_scope() {
        let subjects = vec![subject(1, Program::Mba, Semester::I)];
        let mut other = submission(3, 103, vec![(1, 1, None)]);
        other.semester = Semester::II;
        let submissions = vec![
            submission(1, 101, vec![(1, 5, None)]),
            submission(2, 102, vec![(1, 3, None)]),
            other,
        ];

        let summaries = summarize_scope(&subjects, &submissions, Program::Mba, Semester::I, 50);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].response_count, 2);
        assert_eq!(summaries[0].average_display, "4.00");
    }

    #[test]
    fn test_subject_without_feedback_has_zero_average() {
        let subjects = vec![subject(5, Program::Mba, Semester::I)];
        let summaries = summarize_scope(&subjects, &[], Program::Mba, Semester::I, 50);
        assert_eq!(summaries[0].response_count, 0);
        assert_eq!(summaries[0].average_rating, 0.0);
        assert!(!summaries[0].average_rating.is_nan());
    }

    #[test]
    fn test_deleted_subject_rows_remain_but_scope_excludes_it() {
        let submissions = vec![submission(1, 101, vec![(9, 4, Some("kept"))])];
        // 课程 9 已从目录删除
        let summaries = summarize_scope(&[], &submissions, Program::Mba, Semester::I, 50);
        assert!(summaries.is_empty());
        assert_eq!(subject_stats(9, &submissions, Program::Mca, Semester::I), (0, 0.0));
        assert_eq!(submissions[0].item_for(9).unwrap().rating, 4);
    }

    #[test]
    fn test_comments_follow_store_order_and_cap() {
        let subjects = vec![subject(1, Program::Mba, Semester::I)];
        let submissions = vec![
            submission(3, 103, vec![(1, 4, Some("third"))]),
            submission(1, 101, vec![(1, 4, Some("first"))]),
            submission(2, 102, vec![(1, 4, Some("  "))]),
            submission(4, 104, vec![(1, 4, Some("fourth"))]),
        ];

        let summary = summarize_subject(&subjects[0], &submissions, Program::Mba, Semester::I, 2);
        let texts: Vec<&str> = summary.comments.iter().map(|c| c.comment.as_str()).collect();
        assert_eq!(texts, vec!["third", "first"]);
        assert_eq!(summary.comments[0].submitted_at, submissions[0].submitted_at);
    }

    #[test]
    fn test_histogram_ignores_scope_and_unset() {
        let mut mca = submission(2, 102, vec![(2, 5, None), (3, 5, None)]);
        mca.program = Program::Mca;
        let submissions = vec![submission(1, 101, vec![(1, 1, None), (4, 0, None)]), mca];

        let histogram = rating_histogram(&submissions);
        assert_eq!(histogram.buckets, [1, 0, 0, 0, 2]);
        assert_eq!(histogram.total(), 3);
        assert_eq!(histogram.count(5), 2);
        assert_eq!(histogram.count(0), 0);
    }

    #[test]
    fn test_teacher_summaries_use_each_subject_scope() {
        let subjects = vec![
            subject(1, Program::Mba, Semester::I),
            subject(3, Program::Mca, Semester::II),
            subject(2, Program::Mba, Semester::I),
        ];
        let submissions = vec![submission(1, 101, vec![(1, 2, None), (2, 4, None)])];
        let summaries = summarize_teacher(11, &subjects, &submissions, 50);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].response_count, 1);
        assert_eq!(summaries[1].subject_id, 3);
        assert_eq!(summaries[1].response_count, 0);
    }

    #[test]
    fn test_completion_and_pending() {
        let student = |id: i64, semester: Semester| User {
            id,
            name: format!("Student {id}"),
            email: format!("s{id}@example.edu"),
            program: Some(Program::Mba),
            semester: Some(semester),
            role: UserRole::Student,
        };
        let users = vec![
            student(101, Semester::I),
            student(102, Semester::I),
            student(103, Semester::II),
        ];
        let submissions = vec![submission(1, 101, vec![(1, 5, None)])];

        let stats = completion(&users, &submissions, Program::Mba, Semester::I);
        assert_eq!(stats.submitted, 1);
        assert_eq!(stats.total_students, 2);

        let pending = pending_students(&users, &submissions, Program::Mba, Semester::I);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 102);
    }
}
