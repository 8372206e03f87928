//! MaintenanceOrchestrator — consolidate → abstract → retire, with the
//! persistence side effects of each phase.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};

use engram_consolidation::Consolidator;
use engram_core::config::MaintenanceConfig;
use engram_core::errors::EngramResult;
use engram_core::memory::{Proposition, PropositionStatus};
use engram_core::models::{ConsolidationResult, EntityGroup, MaintenanceResult};
use engram_core::query::PropositionQuery;
use engram_core::traits::{Abstractor, PropositionRepository};

/// Coordinates one maintenance cycle for a context.
///
/// Stateless and reusable across contexts. Callers must serialize
/// `maintain` invocations per context: the abstract and retire phases are
/// read-then-write, not atomic, so two concurrent runs over the same
/// context can race. Runs over different contexts are safe.
pub struct MaintenanceOrchestrator {
    consolidator: Consolidator,
    abstractor: Option<Box<dyn Abstractor>>,
    config: MaintenanceConfig,
}

impl MaintenanceOrchestrator {
    /// Orchestrator without an abstractor; the abstraction phase is
    /// skipped until one is attached.
    pub fn new(consolidator: Consolidator, config: MaintenanceConfig) -> Self {
        Self {
            consolidator,
            abstractor: None,
            config,
        }
    }

    /// Attach an abstraction collaborator.
    pub fn with_abstractor(mut self, abstractor: Box<dyn Abstractor>) -> Self {
        self.abstractor = Some(abstractor);
        self
    }

    pub fn config(&self) -> &MaintenanceConfig {
        &self.config
    }

    /// Run one maintenance cycle over `context_id`, always in the fixed
    /// order consolidate → abstract → retire. Later phases see the
    /// persisted effects of earlier ones. Repository failures abort the
    /// remainder of the failing phase; earlier writes stay in place.
    pub fn maintain(
        &self,
        repository: &dyn PropositionRepository,
        context_id: &str,
        session: &[Proposition],
    ) -> EngramResult<MaintenanceResult> {
        let consolidation = self.consolidate_phase(repository, context_id, session)?;
        let (abstractions, superseded) = self.abstract_phase(repository, context_id)?;
        let retired = self.retire_phase(repository, context_id)?;

        let result = MaintenanceResult {
            consolidation,
            abstractions,
            superseded,
            retired,
        };
        info!(
            context = context_id,
            persisted = result.total_persisted(),
            removed = result.total_removed(),
            "maintenance cycle complete"
        );
        Ok(result)
    }

    /// Phase 1: classify session propositions against existing ACTIVE
    /// memory and persist the promote/reinforce/merge outcomes. Skipped
    /// when no session propositions were supplied.
    fn consolidate_phase(
        &self,
        repository: &dyn PropositionRepository,
        context_id: &str,
        session: &[Proposition],
    ) -> EngramResult<Option<ConsolidationResult>> {
        if session.is_empty() {
            debug!(context = context_id, "no session propositions, skipping consolidation");
            return Ok(None);
        }

        let existing = repository.find(
            &PropositionQuery::in_context(context_id).with_status(PropositionStatus::Active),
        )?;
        let result = self.consolidator.consolidate(session, &existing);

        repository.save_all(&result.promoted)?;
        repository.save_all(&result.reinforced)?;
        let merged: Vec<Proposition> = result.merged.iter().map(|m| m.result.clone()).collect();
        repository.save_all(&merged)?;

        info!(
            context = context_id,
            promoted = result.promoted.len(),
            reinforced = result.reinforced.len(),
            merged = result.merged.len(),
            discarded = result.discarded.len(),
            "consolidation complete"
        );
        Ok(Some(result))
    }

    /// Phase 2: group raw ACTIVE observations by resolved entity, abstract
    /// each group dense enough to summarize, and supersede its sources.
    /// Skipped when no abstractor is configured.
    fn abstract_phase(
        &self,
        repository: &dyn PropositionRepository,
        context_id: &str,
    ) -> EngramResult<(Vec<Proposition>, Vec<Proposition>)> {
        let Some(abstractor) = &self.abstractor else {
            return Ok((Vec::new(), Vec::new()));
        };

        // Raw observations only: abstractions never abstract abstractions
        // in the same pass.
        let raw = repository.find(
            &PropositionQuery::in_context(context_id)
                .with_status(PropositionStatus::Active)
                .with_max_level(0),
        )?;

        // A proposition joins the group of every entity it mentions.
        // Membership is computed once up front, so one group's
        // supersessions cannot shrink another group in the same run.
        let mut groups: BTreeMap<String, Vec<Proposition>> = BTreeMap::new();
        for proposition in &raw {
            for entity_id in proposition.resolved_entity_ids() {
                let members = groups.entry(entity_id).or_default();
                if !members.iter().any(|m| m.id == proposition.id) {
                    members.push(proposition.clone());
                }
            }
        }

        let mut abstractions = Vec::new();
        let mut superseded: Vec<Proposition> = Vec::new();
        for (entity_id, members) in groups {
            if members.len() < self.config.abstraction_threshold {
                continue;
            }

            let group = EntityGroup::new(entity_id.clone(), members.clone());
            let created = abstractor.abstract_group(&group, self.config.abstraction_target_count)?;
            repository.save_all(&created)?;

            let demoted: Vec<Proposition> = members
                .iter()
                .map(|m| m.with_status(PropositionStatus::Superseded))
                .collect();
            repository.save_all(&demoted)?;

            info!(
                context = context_id,
                entity = %entity_id,
                group_size = members.len(),
                abstractions = created.len(),
                "abstracted entity group"
            );
            abstractions.extend(created);
            for d in demoted {
                // A proposition shared by two qualifying groups is
                // superseded twice in storage but reported once.
                if !superseded.iter().any(|s| s.id == d.id) {
                    superseded.push(d);
                }
            }
        }

        Ok((abstractions, superseded))
    }

    /// Phase 3: hard-delete ACTIVE propositions whose effective confidence
    /// has decayed below the retirement floor. Skipped when no floor is
    /// configured. Only ACTIVE entries are considered, so propositions
    /// superseded in phase 2 of the same run are exempt.
    fn retire_phase(
        &self,
        repository: &dyn PropositionRepository,
        context_id: &str,
    ) -> EngramResult<Vec<Proposition>> {
        let Some(retire_below) = self.config.retire_below else {
            return Ok(Vec::new());
        };

        let active = repository.find(
            &PropositionQuery::in_context(context_id).with_status(PropositionStatus::Active),
        )?;
        let now = Utc::now();

        let mut retired = Vec::new();
        for proposition in active {
            let effective = proposition.effective_confidence_at(now, self.config.retire_decay_k);
            if effective < retire_below && repository.delete(&proposition.id)? {
                debug!(
                    id = %proposition.id,
                    effective_confidence = effective,
                    "retired decayed proposition"
                );
                retired.push(proposition);
            }
        }

        if !retired.is_empty() {
            info!(context = context_id, retired = retired.len(), "retirement complete");
        }
        Ok(retired)
    }
}
