//! The ten built-in rules: cloud SDK clients, database connections, and
//! HTTP session pools — the three heavy-init categories named in the
//! purpose statement this tool implements.

use crate::Rule;

const BUILTINS: &[(&str, &str)] = &[
    ("PW001", "boto3.client"),
    ("PW002", "boto3.resource"),
    ("PW003", "boto3.Session"),
    ("PW004", "psycopg2.connect"),
    ("PW005", "pymongo.MongoClient"),
    ("PW006", "redis.Redis"),
    ("PW007", "redis.StrictRedis"),
    ("PW008", "requests.Session"),
    ("PW009", "sqlalchemy.create_engine"),
    ("PW010", "google.cloud.storage.Client"),
];

pub fn all() -> Vec<Rule> {
    BUILTINS
        .iter()
        .map(|(code, qualified_name)| Rule::builtin(code, qualified_name))
        .collect()
}

pub fn heavy_init_message(qualified_name: &str) -> String {
    format!(
        "{qualified_name}(...) is heavy; move it to module scope so it runs once per container, not once per invocation"
    )
}
