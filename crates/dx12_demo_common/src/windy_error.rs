pub type MyResult<T, E = MyReport> = core::result::Result<T, E>;

/// Error type returned by every fallible setup and render step.
pub struct MyReport {
    inner: eyre::Report,
}

impl MyReport {
    pub fn into_inner(self) -> eyre::Report {
        self.inner
    }

    /// The HRESULT of the first Windows error in the cause chain, if any.
    #[cfg(windows)]
    pub fn windows_code(&self) -> Option<windows::core::HRESULT> {
        self.inner
            .chain()
            .find_map(|cause| cause.downcast_ref::<WrappedWindowsError>())
            .map(WrappedWindowsError::code)
    }
}

impl From<eyre::Report> for MyReport {
    fn from(report: eyre::Report) -> Self {
        Self { inner: report }
    }
}

impl std::fmt::Display for MyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner, f)
    }
}

impl std::fmt::Debug for MyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.inner, f)
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for MyReport {
    fn from(error: windows::core::Error) -> Self {
        Self {
            inner: eyre::Report::new(WrappedWindowsError::from(error)),
        }
    }
}

/// Gives `windows::core::Error` a home inside an `eyre::Report`, keeping the
/// HRESULT reachable through `downcast_ref`.
#[cfg(windows)]
pub struct WrappedWindowsError {
    inner: windows::core::Error,
}

#[cfg(windows)]
impl WrappedWindowsError {
    pub fn code(&self) -> windows::core::HRESULT {
        self.inner.code()
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for WrappedWindowsError {
    fn from(error: windows::core::Error) -> Self {
        Self { inner: error }
    }
}

#[cfg(windows)]
impl std::error::Error for WrappedWindowsError {}

#[cfg(windows)]
impl std::fmt::Display for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.inner.message(), self.inner.code())
    }
}

#[cfg(windows)]
impl std::fmt::Debug for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::WrapErr;

    fn parse(value: &str) -> MyResult<u32> {
        let parsed = value
            .parse::<u32>()
            .wrap_err_with(|| format!("parsing {value:?}"))?;
        Ok(parsed)
    }

    #[test]
    fn question_mark_lifts_eyre_reports() {
        assert_eq!(parse("7").unwrap(), 7);
        let report = parse("seven").unwrap_err();
        assert_eq!(report.to_string(), "parsing \"seven\"");
    }

    #[test]
    fn debug_output_keeps_the_cause_chain() {
        let report = parse("seven").unwrap_err();
        let debug = format!("{report:?}");
        assert!(debug.contains("parsing \"seven\""));
        assert!(debug.contains("invalid digit"));
    }

    #[test]
    fn into_inner_returns_the_report() {
        let report = MyReport::from(eyre::eyre!("no adapter"));
        assert_eq!(report.into_inner().to_string(), "no adapter");
    }

    #[cfg(windows)]
    fn create_with_hresult(code: windows::core::HRESULT) -> MyResult<()> {
        let result: windows::core::Result<()> = Err(windows::core::Error::from(code));
        result?;
        Ok(())
    }

    #[cfg(windows)]
    #[test]
    fn windows_errors_keep_their_hresult_through_context() {
        use windows::Win32::Foundation::E_FAIL;

        let report = create_with_hresult(E_FAIL).unwrap_err();
        assert_eq!(report.windows_code(), Some(E_FAIL));

        let wrapped: MyReport = report
            .into_inner()
            .wrap_err("creating the swap chain")
            .into();
        assert_eq!(wrapped.to_string(), "creating the swap chain");
        assert_eq!(wrapped.windows_code(), Some(E_FAIL));
    }

    #[cfg(windows)]
    #[test]
    fn wrapped_windows_error_shows_message_and_code() {
        use windows::Win32::Foundation::E_INVALIDARG;

        let error = windows::core::Error::from(E_INVALIDARG);
        let expected = format!("{} ({:?})", error.message(), E_INVALIDARG);
        let wrapped = WrappedWindowsError::from(error);
        assert_eq!(wrapped.code(), E_INVALIDARG);
        assert_eq!(wrapped.to_string(), expected);
        assert_eq!(format!("{wrapped:?}"), expected);
    }

    #[cfg(windows)]
    #[test]
    fn plain_reports_have_no_windows_code() {
        let report = parse("seven").unwrap_err();
        assert_eq!(report.windows_code(), None);
    }
}
