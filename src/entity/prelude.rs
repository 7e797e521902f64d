//! 预导入模块，方便使用

pub use super::feedback_items::{
    ActiveModel as FeedbackItemActiveModel, Entity as FeedbackItems, Model as FeedbackItemModel,
};
pub use super::subjects::{ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
