use dht_core::{UseCaseValidatable, utils::is_blank};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, stdin, stdout};
use tracing::warn;

use crate::{
    core::domain::models::{
        AppError,
        usecases::{DeleteKeyUseCaseInput, GetKeyUseCaseInput, PutKeyUseCaseInput},
    },
    infrastructure::di::PeerModule,
};

type Input = Lines<BufReader<Stdin>>;

/// Interactive client: asks for an operation, a key and (for PUT) a value,
/// then prints the outcome. Ends on EOF.
pub async fn run_prompt(module: &PeerModule) -> Result<(), AppError> {
    let mut input = BufReader::new(stdin()).lines();

    loop {
        let Some(operation) = ask(&mut input, "Operation (PUT, GET, DELETE): ").await? else {
            return Ok(());
        };

        let Some(key) = ask(&mut input, "Key: ").await? else {
            return Ok(());
        };

        let outcome = match operation.to_ascii_uppercase().as_str() {
            "PUT" => {
                let Some(value) = ask(&mut input, "Value: ").await? else {
                    return Ok(());
                };

                module
                    .put_key_use_case
                    .validate_and_execute(PutKeyUseCaseInput { key, value })
                    .await
                    .map(|out| format!("Status => {} ({} ms)", out.success, out.latency_ms))
            }
            "GET" => module
                .get_key_use_case
                .validate_and_execute(GetKeyUseCaseInput { key })
                .await
                .map(|out| {
                    format!(
                        "Status => {} ({} ms)",
                        out.value.as_deref().unwrap_or("null"),
                        out.latency_ms
                    )
                }),
            "DELETE" => module
                .delete_key_use_case
                .validate_and_execute(DeleteKeyUseCaseInput { key })
                .await
                .map(|out| format!("Status => {} ({} ms)", out.success, out.latency_ms)),
            other => {
                println!("Unsupported operation: {other}");
                continue;
            }
        };

        match outcome {
            Ok(line) => println!("{operation} : {line}"),
            Err(e) => {
                warn!(role = "client", "{operation} failed: {e}");
                println!("{operation} : Error => {e}");
            }
        }
    }
}

/// Prints `label` until a non-blank line is entered. `None` on EOF.
async fn ask(input: &mut Input, label: &str) -> Result<Option<String>, AppError> {
    let mut out = stdout();

    loop {
        out.write_all(label.as_bytes()).await?;
        out.flush().await?;

        match input.next_line().await? {
            Some(line) if is_blank(&line) => continue,
            Some(line) => return Ok(Some(line.trim().to_string())),
            None => return Ok(None),
        }
    }
}
