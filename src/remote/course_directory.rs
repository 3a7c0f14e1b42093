use async_trait::async_trait;

use super::client::RemoteCallClient;
use crate::domain::Course;

/// Narrow interface onto the Course Directory service. Every operation is
/// total: a missing argument or an unreachable directory yields the
/// documented default, never an error. From the caller's point of view
/// "not a lecturer" and "directory unreachable" are indistinguishable.
#[async_trait]
pub trait CourseDirectory: Send + Sync {
    async fn is_responsible_lecturer(
        &self,
        authorization: Option<&str>,
        net_id: Option<&str>,
        course_id: Option<&str>,
    ) -> bool;

    async fn get_course_by_id(
        &self,
        authorization: Option<&str>,
        course_id: Option<&str>,
    ) -> Option<Course>;
}

pub struct HttpCourseDirectory {
    client: RemoteCallClient,
}

impl HttpCourseDirectory {
    pub fn new(client: RemoteCallClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CourseDirectory for HttpCourseDirectory {
    async fn is_responsible_lecturer(
        &self,
        authorization: Option<&str>,
        net_id: Option<&str>,
        course_id: Option<&str>,
    ) -> bool {
        let (Some(net_id), Some(course_id)) = (net_id, course_id) else {
            return false;
        };

        match self
            .client
            .get_json::<bool>(
                "courses/{courseId}/lecturer/{netId}",
                &[course_id, net_id],
                authorization,
            )
            .await
        {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(
                    net_id,
                    course_id,
                    "lecturer check against course directory failed, answering false: {err}"
                );
                false
            }
        }
    }

    async fn get_course_by_id(
        &self,
        authorization: Option<&str>,
        course_id: Option<&str>,
    ) -> Option<Course> {
        let course_id = course_id?;

        match self
            .client
            .get_json::<Course>("courses/{id}", &[course_id], authorization)
            .await
        {
            Ok(course) => Some(course),
            Err(err) => {
                tracing::warn!(
                    course_id,
                    "course lookup against course directory failed, answering not-found: {err}"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Nothing listens on the discard port, so every call fails fast
    fn unreachable() -> HttpCourseDirectory {
        let client =
            RemoteCallClient::new("http://127.0.0.1:9", Duration::from_millis(250)).unwrap();
        HttpCourseDirectory::new(client)
    }

    #[tokio::test]
    async fn missing_arguments_answer_false_without_a_call() {
        let directory = unreachable();
        assert!(
            !directory
                .is_responsible_lecturer(None, None, Some("CSE1300"))
                .await
        );
        assert!(
            !directory
                .is_responsible_lecturer(None, Some("ajansen"), None)
                .await
        );
    }

    #[tokio::test]
    async fn unreachable_directory_answers_false() {
        let directory = unreachable();
        assert!(
            !directory
                .is_responsible_lecturer(None, Some("ajansen"), Some("CSE1300"))
                .await
        );
    }

    #[tokio::test]
    async fn unreachable_directory_answers_not_found() {
        let directory = unreachable();
        assert!(directory.get_course_by_id(None, Some("CSE1300")).await.is_none());
        assert!(directory.get_course_by_id(None, None).await.is_none());
    }
}
