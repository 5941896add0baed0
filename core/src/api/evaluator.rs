//! The evaluator seam: whatever actually runs an accepted expression.

/// Positional and keyword arguments passed through to the evaluator.
///
/// The guard never looks inside them; they reach the evaluator exactly as
/// the caller built them.
///
/// # Example
///
/// ```
/// use numexpr_guard_core::api::Arguments;
///
/// let args = Arguments::new().arg(1.5).named("a", 2.0);
/// assert_eq!(args.positional(), &[1.5]);
/// assert_eq!(args.get("a"), Some(&2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments<V> {
    positional: Vec<V>,
    named: Vec<(String, V)>,
}

impl<V> Default for Arguments<V> {
    fn default() -> Self {
        Self {
            positional: Vec::new(),
            named: Vec::new(),
        }
    }
}

impl<V> Arguments<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: V) -> Self {
        self.positional.push(value);
        self
    }

    /// Append a keyword argument. Order of insertion is kept.
    pub fn named(mut self, name: impl Into<String>, value: V) -> Self {
        self.named.push((name.into(), value));
        self
    }

    pub fn positional(&self) -> &[V] {
        &self.positional
    }

    pub fn named_args(&self) -> &[(String, V)] {
        &self.named
    }

    /// Look up a keyword argument. The first binding of `name` wins.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.named
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub fn into_parts(self) -> (Vec<V>, Vec<(String, V)>) {
        (self.positional, self.named)
    }
}

impl<V> From<Vec<V>> for Arguments<V> {
    fn from(positional: Vec<V>) -> Self {
        Self {
            positional,
            named: Vec::new(),
        }
    }
}

/// Evaluates expression strings that already passed validation.
///
/// Any `Fn(&str, Arguments<V>) -> Result<O, E>` is an evaluator, so a
/// closure is enough for simple embeddings.
pub trait Evaluator<V> {
    type Output;
    type Error;

    fn evaluate(&self, expression: &str, args: Arguments<V>) -> Result<Self::Output, Self::Error>;
}

impl<V, O, E, F> Evaluator<V> for F
where
    F: Fn(&str, Arguments<V>) -> Result<O, E>,
{
    type Output = O;
    type Error = E;

    fn evaluate(&self, expression: &str, args: Arguments<V>) -> Result<O, E> {
        self(expression, args)
    }
}
