use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the channel is
    /// closed. Used after a transaction has already committed, where the
    /// write must not be reported as failed because of a dropped consumer.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event.clone()).await {
            warn!("Event dropped: {:?} ({})", event, e);
        }
    }
}

// Domain events emitted after successful writes. Payloads carry the row
// keys a consumer needs to re-read the affected aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Purchase order events
    PurchaseOrderCreated(i32),
    PurchaseOrderUpdated(i32),
    PurchaseOrderDeleted(i32),
    PurchaseOrderStatusChanged {
        po_no: i32,
        old_status: String,
        new_status: String,
    },

    // Material inward events
    MaterialInwardRecorded {
        inward_id: i32,
        po_no: i32,
        fully_received: bool,
    },
    MaterialInwardUpdated(i32),
    MaterialInwardDeleted(i32),

    // Pending material events
    PendingMaterialRegistered {
        pending_id: i32,
        po_no: i32,
        pending_quantity: i32,
    },
    PendingMaterialResolved {
        pending_id: i32,
        resolved_quantity: i32,
        remaining_quantity: i32,
    },

    // Catalog events
    DealerCreated(i32),
    DealerUpdated(i32),
    DealerDeleted(i32),
    MaterialCreated(i32),
    MaterialUpdated(i32),
    MaterialDeleted(i32),

    // BOM events
    BomCreated(i32),
    BomDeleted(i32),
    BomSupplyRecorded {
        bom_id: i32,
        transaction_id: i32,
    },
}

/// Consumes events from the channel and logs them. Side-effect handlers
/// hang off the match arms; today status transitions are the only events
/// with dedicated logging.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::PurchaseOrderStatusChanged {
                po_no,
                old_status,
                new_status,
            } => {
                info!(
                    po_no = po_no,
                    from = %old_status,
                    to = %new_status,
                    "Purchase order status changed"
                );
            }
            Event::MaterialInwardRecorded {
                inward_id,
                po_no,
                fully_received,
            } => {
                info!(
                    inward_id = inward_id,
                    po_no = po_no,
                    fully_received = fully_received,
                    "Material inward recorded"
                );
            }
            Event::PendingMaterialResolved {
                pending_id,
                resolved_quantity,
                remaining_quantity,
            } => {
                info!(
                    pending_id = pending_id,
                    resolved = resolved_quantity,
                    remaining = remaining_quantity,
                    "Pending material resolved"
                );
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    error!("Event channel closed, processing loop exiting");
}
