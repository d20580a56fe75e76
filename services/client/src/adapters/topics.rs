//! services/client/src/adapters/topics.rs
//!
//! Implements the `TopicService` port over `/topics`.

use async_trait::async_trait;
use forum_client_core::domain::{NewTopic, Topic};
use forum_client_core::ports::{PortResult, TopicService};
use reqwest::Method;

use super::http::HttpAdapter;

#[async_trait]
impl TopicService for HttpAdapter {
    async fn list_topics(&self) -> PortResult<Vec<Topic>> {
        self.send_json(self.request(Method::GET, "/topics")).await
    }

    async fn get_topic(&self, topic_id: i64) -> PortResult<Topic> {
        self.send_json(self.request(Method::GET, &format!("/topics/{}", topic_id)))
            .await
    }

    async fn create_topic(&self, topic: &NewTopic) -> PortResult<Topic> {
        self.send_json(self.request(Method::POST, "/topics").json(topic))
            .await
    }

    async fn update_topic(&self, topic_id: i64, topic: &NewTopic) -> PortResult<Topic> {
        self.send_json(
            self.request(Method::PUT, &format!("/topics/{}", topic_id))
                .json(topic),
        )
        .await
    }

    async fn delete_topic(&self, topic_id: i64) -> PortResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/topics/{}", topic_id)))
            .await
    }
}
