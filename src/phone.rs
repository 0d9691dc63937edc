//! Phone-reveal visibility sequence.

use tracing::debug;

use crate::backend::Backend;
use crate::gateway::ElementGateway;
use crate::locators;
use crate::{Error, Result};

/// Validates the hidden → revealed → hidden phone-number sequence around the
/// reveal button and the escape dismiss.
pub struct PhoneRevealCheck<'a, B> {
    gateway: &'a ElementGateway<B>,
}

impl<'a, B: Backend> PhoneRevealCheck<'a, B> {
    pub fn new(gateway: &'a ElementGateway<B>) -> Self {
        Self { gateway }
    }

    /// Run the sequence exactly once.
    ///
    /// The initial and final states must both be hidden; the revealed state
    /// must appear after clicking the reveal button. A missing reveal button
    /// surfaces as [`Error::NotFound`] and aborts the sequence.
    pub async fn validate_reveal_sequence(&self) -> Result<()> {
        if self.gateway.check_presence(locators::PHONE_CONTAINER).await? {
            return Err(Error::Assertion(
                "phone number visible before reveal".into(),
            ));
        }
        debug!("phone hidden before reveal");

        self.gateway.click(&locators::result_price(1)).await?;
        self.gateway.click(locators::CALL_BUTTON).await?;
        self.gateway
            .await_presence(locators::PHONE_CONTAINER)
            .await?;
        debug!("phone revealed");

        self.gateway.press_escape().await?;
        if self.gateway.check_presence(locators::PHONE_CONTAINER).await? {
            return Err(Error::Assertion(
                "phone number still visible after dismiss".into(),
            ));
        }
        debug!("phone hidden after dismiss");
        Ok(())
    }
}
