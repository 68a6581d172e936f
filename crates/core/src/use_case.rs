use async_trait::async_trait;

/// A single application action, e.g. "put this key through the ring".
#[async_trait]
pub trait UseCase<In, Out, Err>: Send + Sync
where
    In: Send + 'static,
    Out: Send + 'static,
    Err: Send + 'static,
{
    async fn execute(&self, input: In) -> Result<Out, Err>;
}

/// A use case whose input is checked before anything is built from it.
///
/// `validate_and_execute` never reaches `execute` when `validate` fails, so
/// callers can rely on rejected input having no side effects.
#[async_trait]
pub trait UseCaseValidatable<In, Out, Err>: UseCase<In, Out, Err> + Send + Sync
where
    In: Send + Sync + 'static, // Sync porque tomamos &In a través de await
    Out: Send + 'static,
    Err: Send + 'static,
{
    async fn validate(&self, input: &In) -> Result<(), Err>;

    async fn validate_and_execute(&self, input: In) -> Result<Out, Err> {
        self.validate(&input).await?;
        self.execute(input).await
    }
}
