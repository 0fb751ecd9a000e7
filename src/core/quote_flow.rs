use crate::domain::model::{EstimateResult, QuoteRequest};
use crate::domain::ports::Estimator;
use crate::utils::error::{Result, GENERIC_ESTIMATE_FAILURE};
use crate::utils::validation::{validate_description, validate_distance, Validate};
use tokio::sync::watch;

/// Which screen of the quote page is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteStep {
    Form { error: Option<String> },
    Loading,
    Result(EstimateResult),
}

impl Validate for QuoteRequest {
    fn validate(&self) -> Result<()> {
        validate_description("inventory_description", &self.inventory_description)?;
        validate_distance("distance_miles", self.distance_miles)?;
        Ok(())
    }
}

/// One visitor's pass through the quote page: form, loading, then result
/// or back to the form with an error.
pub struct QuoteSession<E: Estimator> {
    estimator: E,
    step: QuoteStep,
    step_tx: watch::Sender<QuoteStep>,
    last_request: Option<QuoteRequest>,
}

impl<E: Estimator> QuoteSession<E> {
    pub fn new(estimator: E) -> Self {
        let initial = QuoteStep::Form { error: None };
        let (step_tx, _) = watch::channel(initial.clone());
        Self {
            estimator,
            step: initial,
            step_tx,
            last_request: None,
        }
    }

    /// Watch the screen change while a submit is in flight.
    pub fn subscribe(&self) -> watch::Receiver<QuoteStep> {
        self.step_tx.subscribe()
    }

    fn set_step(&mut self, step: QuoteStep) {
        // 沒有訂閱者時 send_replace 仍會更新值
        self.step_tx.send_replace(step.clone());
        self.step = step;
    }

    pub fn step(&self) -> &QuoteStep {
        &self.step
    }

    pub fn last_request(&self) -> Option<&QuoteRequest> {
        self.last_request.as_ref()
    }

    pub fn estimate(&self) -> Option<&EstimateResult> {
        match &self.step {
            QuoteStep::Result(result) => Some(result),
            _ => None,
        }
    }

    /// 提交表單；驗證失敗時不會呼叫估價器
    pub async fn submit(&mut self, request: QuoteRequest) -> Result<EstimateResult> {
        self.last_request = Some(request.clone());

        if let Err(e) = request.validate() {
            tracing::warn!("Quote rejected by form validation: {}", e);
            self.set_step(QuoteStep::Form {
                error: Some(e.user_friendly_message()),
            });
            return Err(e);
        }

        tracing::info!(
            from = %request.from_type,
            to = %request.to_type,
            distance_miles = request.distance_miles,
            "⏳ Analyzing inventory..."
        );
        self.set_step(QuoteStep::Loading);

        match self.estimator.estimate(&request.to_input()).await {
            Ok(result) => {
                tracing::info!(
                    "✅ Estimate ready: ${} - ${}",
                    result.price_range.min,
                    result.price_range.max
                );
                self.set_step(QuoteStep::Result(result.clone()));
                Ok(result)
            }
            Err(e) => {
                tracing::error!("❌ Estimate failed: {}", e);
                self.set_step(QuoteStep::Form {
                    error: Some(GENERIC_ESTIMATE_FAILURE.to_string()),
                });
                Err(e)
            }
        }
    }

    /// Back to an empty-error form. The last request is kept for editing.
    pub fn start_over(&mut self) {
        self.set_step(QuoteStep::Form { error: None });
    }
}

impl<E: Estimator> std::fmt::Debug for QuoteSession<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteSession")
            .field("step", &self.step)
            .field("last_request", &self.last_request)
            .finish()
    }
}
