use anyhow::{bail, Context};
use clap::Parser;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};

use mindcheck_client::cookies::cookie_value;
use mindcheck_client::{HttpTransport, PredictForm};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of a running server.
    #[arg(default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(long, default_value = "tester@example.com")]
    email: String,

    #[arg(long, default_value = "StrongPass123!")]
    password: String,

    /// Journal text to submit for prediction.
    #[arg(
        long,
        default_value = "Long walk after work, feeling calm and a little proud of the week."
    )]
    text: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let plain = reqwest::Client::new();

    // Registration is allowed to conflict on reruns.
    let response = plain
        .post(format!("{}/api/register", args.base_url))
        .form(&[
            ("first_name", "Tester"),
            ("last_name", "Account"),
            ("email", &args.email),
            ("password", &args.password),
        ])
        .send()
        .await
        .context("register call failed")?;
    println!("register: {}", response.status());

    let response = plain
        .post(format!("{}/api/login", args.base_url))
        .form(&[("email", &args.email), ("password", &args.password)])
        .send()
        .await
        .context("login call failed")?;
    println!("login: {}", response.status());
    if !response.status().is_success() {
        bail!("login rejected");
    }

    // Collect the session + csrf cookies the way a browser would carry them.
    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::to_string)
        .collect();
    let cookie_header = cookies.join("; ");

    if cookie_value(&cookie_header, "csrftoken").is_none() {
        bail!("login response carried no csrf cookie");
    }

    let mut default_headers = HeaderMap::new();
    default_headers.insert(COOKIE, HeaderValue::from_str(&cookie_header)?);
    let session_client = reqwest::Client::builder()
        .default_headers(default_headers)
        .build()?;

    let mut form = PredictForm::new(
        format!("{}/api/predict", args.base_url),
        HttpTransport::with_client(session_client),
    );

    // Whitespace never leaves the page.
    assert!(form.submit("   ", &cookie_header).await.is_none());

    match form.submit(&args.text, &cookie_header).await {
        Some(panel) => {
            println!("emotion:    {}", panel.emotion);
            println!("confidence: {}", panel.confidence);
            println!("message:    {}", panel.message);
        }
        None => bail!("submission was unexpectedly dropped"),
    }

    Ok(())
}
