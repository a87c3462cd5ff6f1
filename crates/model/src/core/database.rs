use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The backend a connection talks to. Selects which translator compiles a
/// filter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Postgres,
    MySql,
    MariaDb,
    SqlServer,
    Sqlite,
    MongoDb,
    Redis,
    Elasticsearch,
    Cassandra,
}

/// The relational subset of [`DatabaseType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    Postgres,
    MySql,
    MariaDb,
    SqlServer,
    Sqlite,
}

impl DatabaseType {
    pub const ALL: [DatabaseType; 9] = [
        DatabaseType::Postgres,
        DatabaseType::MySql,
        DatabaseType::MariaDb,
        DatabaseType::SqlServer,
        DatabaseType::Sqlite,
        DatabaseType::MongoDb,
        DatabaseType::Redis,
        DatabaseType::Elasticsearch,
        DatabaseType::Cassandra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::Postgres => "postgres",
            DatabaseType::MySql => "mysql",
            DatabaseType::MariaDb => "mariadb",
            DatabaseType::SqlServer => "sqlserver",
            DatabaseType::Sqlite => "sqlite",
            DatabaseType::MongoDb => "mongodb",
            DatabaseType::Redis => "redis",
            DatabaseType::Elasticsearch => "elasticsearch",
            DatabaseType::Cassandra => "cassandra",
        }
    }

    /// Returns the SQL dialect for relational backends, `None` otherwise.
    pub fn sql_dialect(&self) -> Option<SqlDialect> {
        match self {
            DatabaseType::Postgres => Some(SqlDialect::Postgres),
            DatabaseType::MySql => Some(SqlDialect::MySql),
            DatabaseType::MariaDb => Some(SqlDialect::MariaDb),
            DatabaseType::SqlServer => Some(SqlDialect::SqlServer),
            DatabaseType::Sqlite => Some(SqlDialect::Sqlite),
            DatabaseType::MongoDb
            | DatabaseType::Redis
            | DatabaseType::Elasticsearch
            | DatabaseType::Cassandra => None,
        }
    }

    pub fn is_sql(&self) -> bool {
        self.sql_dialect().is_some()
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatabaseType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DatabaseType::Postgres),
            "mysql" => Ok(DatabaseType::MySql),
            "mariadb" => Ok(DatabaseType::MariaDb),
            "sqlserver" | "mssql" => Ok(DatabaseType::SqlServer),
            "sqlite" => Ok(DatabaseType::Sqlite),
            "mongodb" | "mongo" => Ok(DatabaseType::MongoDb),
            "redis" => Ok(DatabaseType::Redis),
            "elasticsearch" | "es" => Ok(DatabaseType::Elasticsearch),
            "cassandra" => Ok(DatabaseType::Cassandra),
            _ => Err(FilterError::InvalidDatabaseType(s.to_string())),
        }
    }
}

impl From<SqlDialect> for DatabaseType {
    fn from(dialect: SqlDialect) -> Self {
        match dialect {
            SqlDialect::Postgres => DatabaseType::Postgres,
            SqlDialect::MySql => DatabaseType::MySql,
            SqlDialect::MariaDb => DatabaseType::MariaDb,
            SqlDialect::SqlServer => DatabaseType::SqlServer,
            SqlDialect::Sqlite => DatabaseType::Sqlite,
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DatabaseType::from(*self))
    }
}

impl TryFrom<DatabaseType> for SqlDialect {
    type Error = FilterError;

    fn try_from(db_type: DatabaseType) -> Result<Self, Self::Error> {
        db_type
            .sql_dialect()
            .ok_or_else(|| FilterError::NotSqlDatabase(db_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("PostgreSQL".parse::<DatabaseType>().unwrap(), DatabaseType::Postgres);
        assert_eq!("mssql".parse::<DatabaseType>().unwrap(), DatabaseType::SqlServer);
        assert!("oracle".parse::<DatabaseType>().is_err());
    }

    #[test]
    fn test_sql_dialect_mapping() {
        assert_eq!(DatabaseType::MariaDb.sql_dialect(), Some(SqlDialect::MariaDb));
        assert!(SqlDialect::try_from(DatabaseType::Redis).is_err());
        for db in DatabaseType::ALL {
            assert_eq!(db.as_str().parse::<DatabaseType>().unwrap(), db);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let db: DatabaseType = serde_json::from_str(r#""sqlserver""#).unwrap();
        assert_eq!(db, DatabaseType::SqlServer);
    }
}
