//! `Order` entity shared by the integration tests.

use statekeeper::builder::TriggerBuilder;
use statekeeper::core::{StateDescriptor, StateSlot, Stateful};
use std::sync::OnceLock;

pub struct Payment {
    pub amount: u64,
}

#[derive(Debug)]
pub struct Order {
    pub id: u64,
    pub state: StateSlot,
}

impl Order {
    pub fn new(id: u64, state: &str) -> Self {
        Self {
            id,
            state: StateSlot::new(state),
        }
    }
}

impl Stateful for Order {
    const TYPE_NAME: &'static str = "Order";
    type Args = Payment;

    fn descriptor() -> &'static StateDescriptor<Payment> {
        static DESCRIPTOR: OnceLock<StateDescriptor<Payment>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            StateDescriptor::builder()
                .initial("Created")
                .states(["Created", "Paid", "Shipped"])
                .trigger(
                    TriggerBuilder::new("pay")
                        .from("Created")
                        .to("Paid")
                        .when(|_tx, payment: &Payment| payment.amount > 0),
                )
                .trigger(TriggerBuilder::new("ship").from("Paid").to("Shipped"))
                .build()
                .expect("order descriptor is valid")
        })
    }

    fn object_id(&self) -> u64 {
        self.id
    }

    fn state(&self) -> &str {
        self.state.get()
    }

    fn set_state(&mut self, state: &str) {
        self.state.set(state);
    }
}
