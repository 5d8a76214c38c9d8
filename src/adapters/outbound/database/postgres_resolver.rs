use crate::config::DatabaseConfig;
use crate::enrichment::domain::PackageMetadata;
use crate::ports::outbound::{MetadataResolver, ResolutionMode};
use crate::shared::error::SbomMetaError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::OnceCell;
use tokio_postgres::{Client, NoTls, Row};

// Versions and repository URLs are each reduced to one row per package
// before joining, so neither side multiplies the other's sums.
const STANDARD_SQL: &str = "
SELECT p.name,
       COALESCE(sum(vs.downloads), 0)::bigint AS downloads,
       min(repo.url) AS url,
       min(vs.first_published) AS first_published,
       max(vs.last_published) AS last_published
FROM packages AS p
JOIN (
    SELECT v.package_id,
           sum(v.downloads) AS downloads,
           min(v.published_at) AS first_published,
           max(v.published_at) AS last_published
    FROM versions AS v
    GROUP BY v.package_id
) AS vs ON vs.package_id = p.id
JOIN (
    SELECT pu.package_id, min(u.url) AS url
    FROM package_urls AS pu
    JOIN urls AS u ON u.id = pu.url_id
    JOIN url_types AS ut ON ut.id = u.url_type_id
    WHERE ut.name = 'repository'
    GROUP BY pu.package_id
) AS repo ON repo.package_id = p.id
WHERE p.name = $1
GROUP BY p.name";

// Dependents are distinct packages with at least one version depending on p.
const FULL_SQL: &str = "
SELECT p.name,
       COALESCE(sum(vs.downloads), 0)::bigint AS downloads,
       COALESCE(sum(rdeps.dependents), 0)::bigint AS dependents,
       min(repo.url) AS url,
       min(vs.first_published) AS first_published,
       max(vs.last_published) AS last_published
FROM packages AS p
JOIN (
    SELECT v.package_id,
           sum(v.downloads) AS downloads,
           min(v.published_at) AS first_published,
           max(v.published_at) AS last_published
    FROM versions AS v
    GROUP BY v.package_id
) AS vs ON vs.package_id = p.id
JOIN (
    SELECT pu.package_id, min(u.url) AS url
    FROM package_urls AS pu
    JOIN urls AS u ON u.id = pu.url_id
    JOIN url_types AS ut ON ut.id = u.url_type_id
    WHERE ut.name = 'repository'
    GROUP BY pu.package_id
) AS repo ON repo.package_id = p.id
LEFT JOIN (
    SELECT d.dependency_id AS package_id,
           count(DISTINCT dv.package_id) AS dependents
    FROM dependencies AS d
    JOIN versions AS dv ON dv.id = d.version_id
    GROUP BY d.dependency_id
) AS rdeps ON rdeps.package_id = p.id
WHERE p.name = $1
GROUP BY p.name";

/// Column values of one aggregated result row, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRow {
    pub name: String,
    pub downloads: i64,
    pub dependents: Option<i64>,
    pub url: String,
    pub first_published: Option<NaiveDateTime>,
    pub last_published: Option<NaiveDateTime>,
}

impl MetadataRow {
    fn from_row(row: &Row, mode: ResolutionMode) -> Result<Self> {
        let dependents = match mode {
            ResolutionMode::Standard => None,
            ResolutionMode::Full => Some(row.try_get::<_, i64>("dependents")?),
        };

        Ok(Self {
            name: row.try_get("name")?,
            downloads: row.try_get("downloads")?,
            dependents,
            url: row.try_get::<_, Option<String>>("url")?.unwrap_or_default(),
            first_published: row.try_get("first_published")?,
            last_published: row.try_get("last_published")?,
        })
    }

    /// Validates the row into a domain record
    ///
    /// `published_at` is stored without a zone and taken as UTC.
    pub fn into_metadata(self) -> Result<PackageMetadata> {
        let downloads = u64::try_from(self.downloads)
            .with_context(|| format!("negative download count {}", self.downloads))?;

        let metadata = PackageMetadata::new(
            self.name,
            downloads,
            self.url,
            self.first_published.map(|ts| ts.and_utc()),
            self.last_published.map(|ts| ts.and_utc()),
        )?;

        match self.dependents {
            None => Ok(metadata),
            Some(raw) => {
                let dependents = u64::try_from(raw)
                    .with_context(|| format!("negative dependents count {}", raw))?;
                Ok(metadata.with_dependents(dependents))
            }
        }
    }
}

fn query_for(mode: ResolutionMode) -> &'static str {
    match mode {
        ResolutionMode::Standard => STANDARD_SQL,
        ResolutionMode::Full => FULL_SQL,
    }
}

/// PostgresMetadataResolver adapter querying the CHAI database
///
/// The connection is opened on the first lookup and shared afterwards;
/// tokio-postgres pipelines concurrent queries over the one client.
pub struct PostgresMetadataResolver {
    config: DatabaseConfig,
    client: OnceCell<Client>,
}

impl PostgresMetadataResolver {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&Client> {
        self.client.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> Result<Client> {
        let mut pg = tokio_postgres::Config::new();
        pg.host(&self.config.host)
            .port(self.config.port)
            .user(&self.config.user)
            .password(&self.config.password)
            .dbname(&self.config.dbname)
            .application_name(env!("CARGO_PKG_NAME"));

        let (client, connection) =
            pg.connect(NoTls)
                .await
                .map_err(|e| SbomMetaError::DatabaseConnection {
                    host: self.config.host.clone(),
                    port: self.config.port,
                    details: e.to_string(),
                })?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("⚠️  Database connection error: {}", e);
            }
        });

        Ok(client)
    }
}

#[async_trait]
impl MetadataResolver for PostgresMetadataResolver {
    async fn resolve(&self, name: &str, mode: ResolutionMode) -> Result<Vec<PackageMetadata>> {
        let client = self.client().await?;

        let rows = client
            .query(query_for(mode), &[&name])
            .await
            .with_context(|| format!("metadata query failed ({} mode)", mode))?;

        rows.iter()
            .map(|row| MetadataRow::from_row(row, mode)?.into_metadata())
            .collect()
    }
}
