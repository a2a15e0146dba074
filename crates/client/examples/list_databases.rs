//! Lists every database on the server and summarises the one named by `dbname`.
//!
//! ```text
//! dbhost=http://127.0.0.1 dbname=users dbusername=admin dbpassword=secret \
//!     cargo run -p couchcandy-client --example list_databases
//! ```

use couchcandy_client::{CouchCandy, Options};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = CouchCandy::from_env()?;

    println!("Databases:");
    println!("==========");
    for db in client.get_all_databases().await? {
        println!("- {}", db);
    }

    let info = client.get_database_info().await?;
    if let Some(error) = &info.error {
        println!("\n{}: {}", client.session().database, error);
        return Ok(());
    }

    println!("\n{}", info.db_name);
    println!("  documents: {}", info.doc_count);
    println!("  deleted:   {}", info.doc_del_count);
    println!("  update seq: {}", info.update_seq);

    let first = client
        .get_all_documents(&Options::new().with_limit(5))
        .await?;
    for row in &first.rows {
        println!("  {} @ {}", row.id, row.value.rev);
    }

    Ok(())
}
