//! Producer registry.
//!
//! Keeps three structures in step: the producers, the product → owner index
//! and the pool of free colors. Every live producer holds exactly one color
//! and no two producers share one; every product has at most one owner.

use std::collections::HashMap;

use log::{debug, error, info};

use crate::error::{ReportError, Result};
use crate::parser::{OwnershipRoster, RosterProducer, ROSTER_ORIGIN};

use super::{Color, ColorPool, Producer};

#[derive(Debug, Clone)]
pub struct ProducerRegistry {
    producers: HashMap<i32, Producer>,
    product_owner: HashMap<i32, i32>,
    colors: ColorPool,
}

impl ProducerRegistry {
    pub fn new(colors: ColorPool) -> Self {
        Self {
            producers: HashMap::new(),
            product_owner: HashMap::new(),
            colors,
        }
    }

    pub fn with_palette(palette: &[Color]) -> Result<Self> {
        Ok(Self::new(ColorPool::from_palette(palette)?))
    }

    /// Register every producer of a parsed roster, then every claim
    pub fn from_roster(roster: OwnershipRoster, palette: &[Color]) -> Result<Self> {
        let mut registry = Self::with_palette(palette)?;
        registry.register_roster(roster)?;
        Ok(registry)
    }

    /// Apply a parsed roster in roster order.
    ///
    /// A failure is tagged with the roster line of the offending record.
    pub fn register_roster(&mut self, roster: OwnershipRoster) -> Result<()> {
        for RosterProducer { line, producer } in roster.producers {
            self.add_producer(producer)
                .map_err(|e| e.at_line(ROSTER_ORIGIN, line))?;
        }
        for claim in &roster.claims {
            self.add_product_ownership(claim.producer_id, claim.product_id)
                .map_err(|e| e.at_line(ROSTER_ORIGIN, claim.line))?;
        }
        info!(
            "Registered {} producer{} with {} product{}",
            self.len(),
            if self.len() != 1 { "s" } else { "" },
            self.product_count(),
            if self.product_count() != 1 { "s" } else { "" }
        );
        Ok(())
    }

    /// Add a colorless producer and give it the next free color
    pub fn add_producer(&mut self, mut producer: Producer) -> Result<()> {
        if let Some(existing) = self.producers.get(&producer.id) {
            return Err(ReportError::DuplicateProducerId {
                id: producer.id,
                existing_name: existing.name.clone(),
            });
        }
        if let Some(color) = &producer.display_color {
            return Err(ReportError::ColorAlreadyAssigned {
                producer_id: producer.id,
                color: color.to_string(),
            });
        }
        let color = self.colors.pop().ok_or(ReportError::PaletteExhausted {
            producer_id: producer.id,
        })?;

        debug!("Producer {} ({}) gets color {}", producer.id, producer.name, color);
        producer.display_color = Some(color);
        self.producers.insert(producer.id, producer);
        self.check_color_accounting();
        Ok(())
    }

    /// Record that `producer_id` owns `product_id`
    pub fn add_product_ownership(&mut self, producer_id: i32, product_id: i32) -> Result<()> {
        if let Some(&owner_id) = self.product_owner.get(&product_id) {
            let owner_name = self
                .producers
                .get(&owner_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            return Err(ReportError::ProductAlreadyOwned {
                product_id,
                owner_id,
                owner_name,
            });
        }
        let producer = self
            .producers
            .get_mut(&producer_id)
            .ok_or(ReportError::UnknownProducer(producer_id))?;

        producer.product_ids.push(product_id);
        self.product_owner.insert(product_id, producer_id);
        Ok(())
    }

    /// Remove a producer, releasing its products and returning its color to
    /// the pool. The producer comes back without a color.
    pub fn remove_producer(&mut self, producer_id: i32) -> Result<Producer> {
        let mut producer = self
            .producers
            .remove(&producer_id)
            .ok_or(ReportError::UnknownProducer(producer_id))?;

        for product_id in &producer.product_ids {
            self.product_owner.remove(product_id);
        }
        if let Some(color) = producer.display_color.take() {
            if let Err(color) = self.colors.push(color) {
                error!("Color pool already full, dropping color {color} of producer {producer_id}");
            }
        }
        debug!("Removed producer {} ({})", producer.id, producer.name);
        self.check_color_accounting();
        Ok(producer)
    }

    /// Color of the producer owning `product_id`
    pub fn color_for_product(&self, product_id: i32) -> Result<&Color> {
        let owner = self.owner_of(product_id).ok_or(ReportError::NotFound {
            kind: "Product owner",
            id: product_id,
        })?;
        owner.display_color.as_ref().ok_or(ReportError::NotFound {
            kind: "Producer color",
            id: owner.id,
        })
    }

    pub fn owner_of(&self, product_id: i32) -> Option<&Producer> {
        self.product_owner
            .get(&product_id)
            .and_then(|owner_id| self.producers.get(owner_id))
    }

    pub fn producer(&self, producer_id: i32) -> Option<&Producer> {
        self.producers.get(&producer_id)
    }

    /// Number of live producers
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Number of owned products across all producers
    pub fn product_count(&self) -> usize {
        self.product_owner.len()
    }

    /// Colors still free to hand out
    pub fn available_colors(&self) -> usize {
        self.colors.len()
    }

    fn check_color_accounting(&self) {
        debug_assert_eq!(
            self.colors.len() + self.producers.len(),
            self.colors.capacity(),
            "every palette color is either free or held by exactly one producer"
        );
        debug_assert!(
            self.producers
                .values()
                .filter_map(Producer::display_color)
                .all(|color| !self.colors.contains(color)),
            "a held color is also free"
        );
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
