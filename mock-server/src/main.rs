use mock_server::{sample_comments, sample_issue, Fixture, Upstream};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "4000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;

    let upstream = Upstream::new().with_issue(
        "octo",
        "demo",
        1,
        Fixture::new(sample_issue(1), sample_comments()),
    );

    println!("fake GitHub listening on {addr} (try /repos/octo/demo/issues/1)");
    mock_server::run(listener, upstream).await
}
