use tracing::{debug, info};

use crate::constants::{QUIZZES_NODE, SCHEDULE_NODE, USERS_ROOT};
use crate::parser::{parse_courses, parse_quizzes};
use crate::raw_types::{RawQuizzes, RawSchedule};
use crate::store::feed::ChangeFeed;
use crate::store::input_types::{CourseAdd, CourseEdit, QuizAdd};
use crate::store::request_data::{ReqType, ReqwestStoreClientData, StoreRequestData};
use crate::store::st_helper::{
    extract_text, process_get_text, process_push_response, process_write_response,
    status_error,
};
use crate::types::{self, Courses, Quizzes};

/// A structure that can be used to get raw data from the store, with minimal error
/// handling.
///
/// For full access, consider using `UserRequest`.
pub struct UserRawRequest<'a> {
    pub(crate) uid: &'a str,
    pub(crate) info: StoreRequestData<'a>,
}

impl<'a> UserRawRequest<'a> {
    /// Gets the user's schedule.
    ///
    /// # Returns
    /// The schedule collection, as returned by the store. This is `null` if the user has
    /// no courses.
    pub async fn get_schedule(&self) -> types::Result<String> {
        let url = self.info.url_for(&[USERS_ROOT, self.uid, SCHEDULE_NODE])?;
        extract_text(self.info.req(ReqType::Get(url)).send().await).await
    }

    /// Gets the user's quizzes.
    ///
    /// # Returns
    /// The quiz collection, as returned by the store. Quizzes are nested under the ID of
    /// their course.
    pub async fn get_quizzes(&self) -> types::Result<String> {
        let url = self.info.url_for(&[USERS_ROOT, self.uid, QUIZZES_NODE])?;
        extract_text(self.info.req(ReqType::Get(url)).send().await).await
    }

    /// Opens the change feed of a collection of the user.
    async fn listen(&self, node: &str) -> types::Result<ChangeFeed> {
        let url = self.info.url_for(&[USERS_ROOT, self.uid, node])?;
        let res = self.info.req(ReqType::Listen(url)).send().await?;
        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        debug!("Opened change feed for {}/{node}", self.uid);
        Ok(ChangeFeed::new(res))
    }
}

/// A structure that can be used to read, add, edit, and delete a user's courses and
/// quizzes. The responses are parsed for you.
pub struct UserRequest<'a> {
    pub(crate) raw: UserRawRequest<'a>,
}

impl<'a> UserRequest<'a> {
    /// Checks if the auth token can read this user's data.
    ///
    /// # Returns
    /// `true` if the token is valid for this user, and `false` otherwise.
    ///
    /// # Example
    /// ```rust,no_run
    /// use classboard::store::StoreWrapper;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let wrapper = StoreWrapper::builder()
    ///     .with_database_url("https://my-app.firebaseio.com")
    ///     .with_auth_token("my token")
    ///     .try_build_wrapper()
    ///     .unwrap();
    /// assert!(wrapper.req("my uid").parsed().is_valid().await);
    /// # }
    /// ```
    pub async fn is_valid(&self) -> bool {
        self.raw.get_schedule().await.is_ok()
    }

    /// Gets all courses in the user's schedule.
    ///
    /// # Returns
    /// The courses, in the order they were created.
    pub async fn get_courses(&self) -> types::Result<Courses> {
        Ok(parse_courses(process_get_text::<RawSchedule>(
            self.raw.get_schedule().await?,
        )?))
    }

    /// Gets all quizzes that the user is tracking.
    ///
    /// # Returns
    /// The quizzes, in the order they were created.
    pub async fn get_quizzes(&self) -> types::Result<Quizzes> {
        Ok(parse_quizzes(process_get_text::<RawQuizzes>(
            self.raw.get_quizzes().await?,
        )?))
    }

    /// Adds a course to the user's schedule.
    ///
    /// # Parameters
    /// - `course`: The course to add.
    ///
    /// # Returns
    /// The ID that the store assigned to the course.
    ///
    /// # Example
    /// ```rust,no_run
    /// use classboard::store::input_types::{CourseAdd, DaySelection};
    /// use classboard::store::StoreWrapper;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let wrapper = StoreWrapper::builder()
    ///     .with_database_url("https://my-app.firebaseio.com")
    ///     .with_auth_token("my token")
    ///     .try_build_wrapper()
    ///     .unwrap();
    ///
    /// let course = CourseAdd::builder()
    ///     .with_subject("Biology")
    ///     .with_days(DaySelection::preset("TuTh").unwrap())
    ///     .with_start_time("8:00")
    ///     .with_end_time("9:15")
    ///     .try_build()
    ///     .unwrap();
    ///
    /// let id = wrapper.req("my uid").parsed().add_course(&course).await;
    /// assert!(id.is_ok());
    /// # }
    /// ```
    pub async fn add_course(&self, course: &CourseAdd<'_>) -> types::Result<String> {
        let url = self
            .raw
            .info
            .url_for(&[USERS_ROOT, self.raw.uid, SCHEDULE_NODE])?;
        let id = process_push_response(
            self.raw
                .info
                .req(ReqType::Post(url))
                .body(serde_json::to_string(course)?)
                .send()
                .await,
        )
        .await?;

        info!("Added course '{}' as {id}", course.subject);
        Ok(id)
    }

    /// Changes an existing course. Only the fields set in `edit` are changed.
    ///
    /// # Parameters
    /// - `course_id`: The ID of the course.
    /// - `edit`: The changes.
    ///
    /// # Returns
    /// Nothing if the course was updated, or the error.
    pub async fn update_course(
        &self,
        course_id: impl AsRef<str>,
        edit: &CourseEdit<'_>,
    ) -> types::Result<()> {
        if edit.is_empty() {
            return Ok(());
        }

        let course_id = course_id.as_ref();
        let url = self
            .raw
            .info
            .url_for(&[USERS_ROOT, self.raw.uid, SCHEDULE_NODE, course_id])?;
        process_write_response(
            self.raw
                .info
                .req(ReqType::Patch(url))
                .body(serde_json::to_string(&edit.to_patch())?)
                .send()
                .await,
            false,
        )
        .await?;

        info!("Updated course {course_id}");
        Ok(())
    }

    /// Deletes a course from the user's schedule. Quizzes for this course are left alone;
    /// they stay until they are deleted.
    ///
    /// # Parameters
    /// - `course_id`: The ID of the course.
    ///
    /// # Returns
    /// Nothing if the course is gone, or the error.
    pub async fn delete_course(&self, course_id: impl AsRef<str>) -> types::Result<()> {
        let course_id = course_id.as_ref();
        let url = self
            .raw
            .info
            .url_for(&[USERS_ROOT, self.raw.uid, SCHEDULE_NODE, course_id])?;
        process_write_response(self.raw.info.req(ReqType::Delete(url)).send().await, true)
            .await?;

        info!("Deleted course {course_id}");
        Ok(())
    }

    /// Adds a quiz to a course.
    ///
    /// # Parameters
    /// - `quiz`: The quiz to add.
    ///
    /// # Returns
    /// The ID that the store assigned to the quiz.
    pub async fn add_quiz(&self, quiz: &QuizAdd<'_>) -> types::Result<String> {
        let url = self.raw.info.url_for(&[
            USERS_ROOT,
            self.raw.uid,
            QUIZZES_NODE,
            quiz.subject_id.as_ref(),
        ])?;
        let id = process_push_response(
            self.raw
                .info
                .req(ReqType::Post(url))
                .body(serde_json::to_string(quiz)?)
                .send()
                .await,
        )
        .await?;

        info!("Added quiz '{}' for {} as {id}", quiz.lesson, quiz.subject);
        Ok(id)
    }

    /// Deletes a quiz. Deleting a quiz that is already gone is not an error.
    ///
    /// # Parameters
    /// - `subject_id`: The ID of the course that the quiz is under.
    /// - `quiz_id`: The ID of the quiz.
    ///
    /// # Returns
    /// Nothing if the quiz is gone, or the error.
    pub async fn delete_quiz(
        &self,
        subject_id: impl AsRef<str>,
        quiz_id: impl AsRef<str>,
    ) -> types::Result<()> {
        let quiz_id = quiz_id.as_ref();
        let url = self.raw.info.url_for(&[
            USERS_ROOT,
            self.raw.uid,
            QUIZZES_NODE,
            subject_id.as_ref(),
            quiz_id,
        ])?;
        process_write_response(self.raw.info.req(ReqType::Delete(url)).send().await, true)
            .await?;

        info!("Deleted quiz {quiz_id}");
        Ok(())
    }

    /// Subscribes to changes to the user's schedule.
    ///
    /// # Returns
    /// The change feed.
    pub async fn listen_schedule(&self) -> types::Result<ChangeFeed> {
        self.raw.listen(SCHEDULE_NODE).await
    }

    /// Subscribes to changes to the user's quizzes.
    ///
    /// # Returns
    /// The change feed.
    pub async fn listen_quizzes(&self) -> types::Result<ChangeFeed> {
        self.raw.listen(QUIZZES_NODE).await
    }
}
