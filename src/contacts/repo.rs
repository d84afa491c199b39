use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;

use crate::validation::NewContact;

/// Triage state of a contact. Stored as the `contact_status` Postgres
/// enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "contact_status", rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl ContactStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "read" => Some(Self::Read),
            "replied" => Some(Self::Replied),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Filter shared by the list and count queries so `total` always agrees
/// with the page slice.
#[derive(Debug, Default, Clone)]
pub struct ContactFilter {
    pub status: Option<ContactStatus>,
    pub search: Option<String>,
}

/// Partial update applied by the admin. At least one field must be set;
/// the handler enforces that before calling `update`.
#[derive(Debug, Default, Clone)]
pub struct ContactChanges {
    pub status: Option<ContactStatus>,
    pub notes: Option<String>,
}

impl ContactChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none()
    }
}

#[derive(Debug, Serialize, FromRow)]
pub struct ContactStats {
    pub total: i64,
    pub new: i64,
    pub today: i64,
    pub week: i64,
    pub month: i64,
}

const CONTACT_COLUMNS: &str = "id, name, email, phone, message, status, notes, created_at";

/// Escape LIKE metacharacters so a search term only ever matches as a
/// literal substring.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ContactFilter) {
    let mut sep = " WHERE ";
    if let Some(status) = filter.status {
        qb.push(sep).push("status = ").push_bind(status);
        sep = " AND ";
    }
    if let Some(term) = &filter.search {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(sep)
            .push("(name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR message ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl Contact {
    pub async fn insert(db: &PgPool, new: &NewContact) -> anyhow::Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, email, phone, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, message, status, notes, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.message)
        .fetch_one(db)
        .await?;
        Ok(contact)
    }

    /// Page of contacts matching the filter, newest first.
    pub async fn list(
        db: &PgPool,
        filter: &ContactFilter,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Contact>> {
        let mut qb = QueryBuilder::new(format!("SELECT {CONTACT_COLUMNS} FROM contacts"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let rows = qb.build_query_as::<Contact>().fetch_all(db).await?;
        Ok(rows)
    }

    /// Count of all rows matching the filter, ignoring pagination.
    pub async fn count(db: &PgPool, filter: &ContactFilter) -> anyhow::Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM contacts");
        push_filter(&mut qb, filter);
        let total = qb.build_query_scalar::<i64>().fetch_one(db).await?;
        Ok(total)
    }

    /// Apply a partial update and return the full updated row, or None if
    /// the id does not exist.
    pub async fn update(
        db: &PgPool,
        id: i64,
        changes: &ContactChanges,
    ) -> anyhow::Result<Option<Contact>> {
        let mut qb = QueryBuilder::new("UPDATE contacts SET ");
        let mut assignments = qb.separated(", ");
        if let Some(status) = changes.status {
            assignments.push("status = ").push_bind_unseparated(status);
        }
        if let Some(notes) = &changes.notes {
            assignments.push("notes = ").push_bind_unseparated(notes.as_str());
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {CONTACT_COLUMNS}"));
        let row = qb.build_query_as::<Contact>().fetch_optional(db).await?;
        Ok(row)
    }

    /// Hard delete. Returns false if the id did not exist.
    pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Full-table counters for the dashboard. `today` is calendar-aligned
    /// (start of the current UTC day); `week`/`month` are trailing windows
    /// relative to the call instant.
    pub async fn stats(db: &PgPool) -> anyhow::Result<ContactStats> {
        let stats = sqlx::query_as::<_, ContactStats>(
            r#"
            SELECT
                COUNT(*)                                                              AS total,
                COUNT(*) FILTER (WHERE status = 'new')                                AS "new",
                COUNT(*) FILTER (WHERE created_at >= date_trunc('day', now()))        AS today,
                COUNT(*) FILTER (WHERE created_at >= now() - interval '7 days')       AS week,
                COUNT(*) FILTER (WHERE created_at >= now() - interval '30 days')      AS month
            FROM contacts
            "#,
        )
        .fetch_one(db)
        .await?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_only_enum_values() {
        assert_eq!(ContactStatus::parse("new"), Some(ContactStatus::New));
        assert_eq!(ContactStatus::parse("read"), Some(ContactStatus::Read));
        assert_eq!(ContactStatus::parse("replied"), Some(ContactStatus::Replied));
        assert_eq!(ContactStatus::parse("archived"), Some(ContactStatus::Archived));
        assert_eq!(ContactStatus::parse("bogus"), None);
        assert_eq!(ContactStatus::parse("New"), None);
        assert_eq!(ContactStatus::parse(""), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ContactStatus::Replied).unwrap();
        assert_eq!(json, "\"replied\"");
        let back: ContactStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(back, ContactStatus::Archived);
    }

    #[test]
    fn escape_like_neutralizes_metacharacters() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("alice"), "alice");
    }

    #[test]
    fn filter_composes_parameterized_sql() {
        let filter = ContactFilter {
            status: Some(ContactStatus::New),
            search: Some("alice".into()),
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contacts");
        push_filter(&mut qb, &filter);
        let sql = qb.sql();
        assert!(sql.contains("WHERE status = $1"));
        assert!(sql.contains("name ILIKE $2"));
        assert!(sql.contains("OR email ILIKE $3"));
        assert!(sql.contains("OR message ILIKE $4"));
        // The term itself never appears in the SQL text.
        assert!(!sql.contains("alice"));
    }

    #[test]
    fn empty_filter_adds_no_where_clause() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contacts");
        push_filter(&mut qb, &ContactFilter::default());
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM contacts");
    }

    #[test]
    fn changes_emptiness() {
        assert!(ContactChanges::default().is_empty());
        assert!(!ContactChanges {
            status: Some(ContactStatus::Read),
            notes: None
        }
        .is_empty());
        assert!(!ContactChanges {
            status: None,
            notes: Some("call back".into())
        }
        .is_empty());
    }
}
