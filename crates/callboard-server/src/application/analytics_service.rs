//! Analytics Application Service (Use Case)
//!
//! Reads a snapshot of the record log and runs the pure aggregation
//! engine over it. Read failures surface immediately; a query that
//! matches zero rows is a successful report full of zero defaults.

use std::sync::Arc;

use callboard::{analytics, AnalyticsReport, CallRecordRepository, Country, DomainError};

/// Application service for analytics queries
pub struct AnalyticsService<R: CallRecordRepository> {
    repo: Arc<R>,
}

impl<R: CallRecordRepository> AnalyticsService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Aggregate all views over the log, optionally restricted to a country
    pub async fn analyze(&self, country: Option<Country>) -> Result<AnalyticsReport, DomainError> {
        let records = self.repo.scan(country).await?;
        Ok(analytics::analyze(&records, chrono::Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::IngestService;
    use async_trait::async_trait;
    use callboard::{normalize, CallRecord, NewCallRecord, Sentiment};
    use std::sync::Mutex;
    use uuid::Uuid;

    struct InMemoryRepository {
        records: Mutex<Vec<CallRecord>>,
    }

    impl InMemoryRepository {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CallRecordRepository for InMemoryRepository {
        async fn append(&self, record: &NewCallRecord) -> Result<CallRecord, DomainError> {
            let saved = CallRecord {
                id: Uuid::new_v4(),
                phone: record.phone.clone(),
                status: record.status.clone(),
                sentiment: record.sentiment,
                call_human: record.call_human,
                summary: record.summary.clone(),
                attempt: record.attempt,
                duration: record.duration,
                country: record.country,
                created_at: record.created_at.unwrap_or_else(chrono::Utc::now),
            };
            self.records.lock().unwrap().push(saved.clone());
            Ok(saved)
        }

        async fn scan(&self, country: Option<Country>) -> Result<Vec<CallRecord>, DomainError> {
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .filter(|r| country.map_or(true, |c| r.country == c))
                .cloned()
                .collect())
        }
    }

    fn new_record(phone: &str, status: &str) -> NewCallRecord {
        let phone = normalize::clean_phone(phone);
        NewCallRecord {
            status: status.to_string(),
            sentiment: normalize::sentiment_for(status),
            call_human: normalize::needs_human(status),
            summary: String::new(),
            attempt: 1,
            duration: 60,
            country: normalize::country_for(&phone),
            created_at: None,
            phone,
        }
    }

    #[tokio::test]
    async fn ingest_then_analyze_reflects_the_new_record() {
        let repo = Arc::new(InMemoryRepository::new());
        let ingest = IngestService::new(repo.clone());
        let analytics = AnalyticsService::new(repo);

        let before = analytics.analyze(None).await.unwrap();
        assert_eq!(before.summary.total_calls, 0);

        let saved = ingest
            .ingest(new_record("+34 600 111 222", "success"))
            .await
            .unwrap();
        assert_eq!(saved.phone, "+34600111222");
        assert_eq!(saved.sentiment, Sentiment::Satisfied);

        let after = analytics.analyze(None).await.unwrap();
        assert_eq!(after.summary.total_calls, 1);
        assert_eq!(after.status_distribution["success"], 1);
        assert_eq!(after.sentiment_distribution["satisfied"], 1);
        assert_eq!(after.recent_calls.len(), 1);
        assert_eq!(after.recent_calls[0].id, saved.id);
    }

    #[tokio::test]
    async fn country_filter_restricts_every_view() {
        let repo = Arc::new(InMemoryRepository::new());
        let ingest = IngestService::new(repo.clone());
        let analytics = AnalyticsService::new(repo);

        ingest
            .ingest(new_record("+351911222333", "success"))
            .await
            .unwrap();
        ingest
            .ingest(new_record("+34600111222", "hang up"))
            .await
            .unwrap();
        ingest
            .ingest(new_record("+34600333444", "callback requested"))
            .await
            .unwrap();

        let report = analytics.analyze(Some(Country::Pt)).await.unwrap();

        assert_eq!(report.summary.total_calls, 1);
        assert_eq!(report.summary.partners_contacted, 1);
        assert_eq!(report.status_distribution.len(), 1);
        assert_eq!(report.status_distribution["success"], 1);
        assert!(report.recent_calls.iter().all(|r| r.country == Country::Pt));

        let all = analytics.analyze(None).await.unwrap();
        assert_eq!(all.summary.total_calls, 3);
        assert_eq!(all.summary.human_needed, 1);
    }
}
