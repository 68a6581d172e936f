#[derive(Debug)]
pub struct DeleteKeyUseCaseInput {
    pub key: String,
}

#[derive(Debug)]
pub struct DeleteKeyUseCaseOutput {
    /// True when the key existed on its owner.
    pub success: bool,
    pub latency_ms: u64,
}
