#[derive(Debug)]
pub struct GetKeyUseCaseInput {
    pub key: String,
}

#[derive(Debug)]
pub struct GetKeyUseCaseOutput {
    pub value: Option<String>,
    pub latency_ms: u64,
}
