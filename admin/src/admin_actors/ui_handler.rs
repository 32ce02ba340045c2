use crate::admin_actors::admin::Admin;
use crate::internal_messages::messages::{RefreshPending, ReviewPending, SubmitReview};
use actix::prelude::*;
use common::logger::Logger;
use common::types::dtos::VendorDTO;
use std::io::{self, Write};

/// Actor UIHandler: Interfaz humano-sistema
pub struct UIHandler {
    /// Canal de envío hacia el actor `Admin`
    pub admin: Addr<Admin>,
    pub logger: Logger,
}

impl UIHandler {
    pub fn new(admin: Addr<Admin>, logger: Logger) -> Self {
        UIHandler { admin, logger }
    }

    fn ask_user_review(
        &self,
        _ctx: &mut Context<Self>,
        pending_vendors: Vec<VendorDTO>,
    ) -> Option<(String, bool)> {
        let selected_index = loop {
            self.logger
                .info("\nSelect a vendor by number ('r' to refresh the queue):");
            for (i, vendor) in pending_vendors.iter().enumerate() {
                self.logger.info(format!(
                    "{}: {} (license: {})",
                    i + 1,
                    vendor.name,
                    vendor.license_ref
                ));
            }
            io::stdout().flush().unwrap();

            let mut input = String::new();
            if let Err(e) = io::stdin().read_line(&mut input) {
                self.logger.error(format!(
                    "Error while reading input: {}. Please try again.",
                    e
                ));
                continue;
            }

            let trimmed = input.trim();
            if trimmed.eq_ignore_ascii_case("r") {
                return None;
            }

            match trimmed.parse::<usize>() {
                Ok(num) if num >= 1 && num <= pending_vendors.len() => break num - 1,
                _ => {
                    self.logger.warn(
                        "Invalid selection. Please enter a number corresponding to a vendor.",
                    );
                    continue;
                }
            }
        };

        let selected_vendor = &pending_vendors[selected_index];

        // Veredicto sobre la licencia
        let approved = loop {
            self.logger.info(format!(
                "Approve license '{}' of {}? (a = approve, d = deny):",
                selected_vendor.license_ref, selected_vendor.name
            ));
            io::stdout().flush().unwrap();

            let mut verdict = String::new();
            if let Err(e) = io::stdin().read_line(&mut verdict) {
                self.logger.error(format!(
                    "Error while reading verdict: {}. Please try again.",
                    e
                ));
                continue;
            }

            match verdict.trim().to_ascii_lowercase().as_str() {
                "a" | "approve" => break true,
                "d" | "deny" => break false,
                _ => {
                    self.logger.warn("Please answer 'a' or 'd'.");
                    continue;
                }
            }
        };

        Some((selected_vendor.vendor_id.clone(), approved))
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info("UIHandler iniciado!");
    }
}

impl Handler<ReviewPending> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: ReviewPending, ctx: &mut Self::Context) {
        if msg.vendors.is_empty() {
            self.logger
                .info("No vendors awaiting review. Waiting for new registrations...");
            return;
        }
        match self.ask_user_review(ctx, msg.vendors) {
            Some((vendor_id, approved)) => {
                self.admin.do_send(SubmitReview {
                    vendor_id,
                    approved,
                });
            }
            None => {
                self.admin.do_send(RefreshPending);
            }
        }
    }
}
