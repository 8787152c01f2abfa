/// # Detection Result
///
/// Structured outcome of a disposable-domain check for one address.
///
/// ## Fields
/// - `isDisposable`: whether the domain is on the disposable list
/// - `domain`: the normalized domain (empty when detection failed)
/// - `error`: failure message, present only when detection failed
///
/// ## Example JSON
/// ```json
/// {
///   "isDisposable": true,
///   "domain": "mailinator.com"
/// }
/// ```
pub mod detection;

pub use detection::DetectionResult;
