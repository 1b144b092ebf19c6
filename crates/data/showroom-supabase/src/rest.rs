//! PostgREST table access.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{Error, Result};

/// Query parameters for a table request: optional column list, `eq` filters,
/// ordering, and a row limit. Assembles into PostgREST query-string form.
#[derive(Debug, Clone, Default)]
pub struct Query {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to return, PostgREST syntax (`*`, `*, car_images(*)`, ...).
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(format!("{column}.asc"));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(format!("{column}.desc"));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// The assembled query string pairs.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        for (column, op) in &self.filters {
            params.push((column.clone(), op.clone()));
        }
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// HTTP client for the `/rest/v1` table endpoints.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base: Url,
    key: String,
}

impl RestClient {
    pub fn new(base_url: &str, key: &str) -> Result<Self> {
        let base = Url::parse(base_url)?.join("rest/v1/")?;
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base,
            key: key.to_string(),
        })
    }

    fn table_url(&self, table: &str, query: &Query) -> Result<Url> {
        let mut url = self.base.join(table)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query.params() {
                pairs.append_pair(&name, &value);
            }
        }
        Ok(url)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Fetch matching rows.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: Query) -> Result<Vec<T>> {
        let url = self.table_url(table, &query)?;
        let response = self
            .authed(self.http.get(url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }

    /// Insert one row, discarding the stored representation.
    pub async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<()> {
        let url = self.table_url(table, &Query::new())?;
        let response = self
            .authed(self.http.post(url))
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }

    /// Insert one row and return it as stored (server-side id, timestamps).
    pub async fn insert_returning<T, R>(&self, table: &str, row: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = self.table_url(table, &Query::new())?;
        let response = self
            .authed(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let response = check_status(response).await?;
        let mut rows: Vec<R> = response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;
        if rows.is_empty() {
            return Err(Error::Decode("insert returned no rows".to_string()));
        }
        Ok(rows.remove(0))
    }

    /// Patch every row matching the query.
    pub async fn update<P: Serialize>(&self, table: &str, query: Query, patch: &P) -> Result<()> {
        let url = self.table_url(table, &query)?;
        let response = self
            .authed(self.http.patch(url))
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }

    /// Delete every row matching the query.
    pub async fn delete(&self, table: &str, query: Query) -> Result<()> {
        let url = self.table_url(table, &query)?;
        let response = self
            .authed(self.http.delete(url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_assembly() {
        let query = Query::new()
            .select("*")
            .eq("car_id", "abc-123")
            .order_asc("display_order")
            .limit(6);

        assert_eq!(
            query.params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("car_id".to_string(), "eq.abc-123".to_string()),
                ("order".to_string(), "display_order.asc".to_string()),
                ("limit".to_string(), "6".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(Query::new().params().is_empty());
    }

    #[test]
    fn test_table_url_shape() {
        let client = RestClient::new("https://project.supabase.co", "anon-key")
            .expect("client builds");
        let url = client
            .table_url("cars", &Query::new().select("*").order_desc("created_at"))
            .expect("url builds");

        assert_eq!(
            url.as_str(),
            "https://project.supabase.co/rest/v1/cars?select=*&order=created_at.desc"
        );
    }

    #[test]
    fn test_base_url_with_trailing_slash() {
        let client =
            RestClient::new("https://project.supabase.co/", "anon-key").expect("client builds");
        let url = client
            .table_url("faqs", &Query::new())
            .expect("url builds");
        assert_eq!(url.as_str(), "https://project.supabase.co/rest/v1/faqs");
    }
}
