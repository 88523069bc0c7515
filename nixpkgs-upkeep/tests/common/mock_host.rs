//! Proposal host backed by a map of pull requests.

use async_trait::async_trait;
use nixpkgs_upkeep::{
    HostError, NewProposal, Proposal, ProposalHost, ProposalQuery, ProposalRef, ProposalUpdate,
};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct Hosted {
    proposal: Proposal,
    author: String,
}

#[derive(Debug, Default)]
struct State {
    proposals: BTreeMap<u64, Hosted>,
    next_number: u64,
    comments: Vec<(u64, String)>,
    calls: Vec<String>,
    ready_transitions: usize,
    fail_on: Option<&'static str>,
}

/// Records every call and keeps pull requests in memory.
#[derive(Debug)]
pub struct MockHost {
    state: Mutex<State>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_number: 1000,
                ..State::default()
            }),
        }
    }

    /// Makes the named operation fail from now on.
    pub fn fail_on(&self, operation: &'static str) {
        self.state.lock().unwrap().fail_on = Some(operation);
    }

    /// Adds an open pull request and returns its number.
    pub fn seed(
        &self,
        number: u64,
        author: &str,
        title: &str,
        head_ref: &str,
        body: &str,
        draft: bool,
    ) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.proposals.insert(
            number,
            Hosted {
                proposal: Proposal {
                    number,
                    node_id: format!("PR_{number}"),
                    title: title.to_string(),
                    body: body.to_string(),
                    head_ref: head_ref.to_string(),
                    base_ref: "master".to_string(),
                    html_url: format!("https://github.com/NixOS/nixpkgs/pull/{number}"),
                    is_draft: draft,
                },
                author: author.to_string(),
            },
        );
        number
    }

    pub fn proposal(&self, number: u64) -> Proposal {
        self.state.lock().unwrap().proposals[&number].proposal.clone()
    }

    pub fn proposal_count(&self) -> usize {
        self.state.lock().unwrap().proposals.len()
    }

    pub fn comments(&self) -> Vec<(u64, String)> {
        self.state.lock().unwrap().comments.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of draft to ready transitions performed.
    pub fn ready_transitions(&self) -> usize {
        self.state.lock().unwrap().ready_transitions
    }

    /// Returns `true` if any call other than a search was made.
    pub fn mutated(&self) -> bool {
        self.calls().iter().any(|call| {
            call.starts_with("create") || call.starts_with("update") || call.starts_with("mark")
        })
    }
}

fn enter(state: &mut State, call: String, operation: &'static str) -> Result<(), HostError> {
    state.calls.push(call);
    if state.fail_on == Some(operation) {
        return Err(HostError::GraphQl {
            message: format!("injected failure in {operation}"),
        });
    }
    Ok(())
}

#[async_trait]
impl ProposalHost for MockHost {
    async fn search_open_proposals(
        &self,
        query: &ProposalQuery,
    ) -> Result<Vec<ProposalRef>, HostError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        enter(
            state,
            format!("search {}", query.title_terms.join(" ")),
            "search",
        )?;

        Ok(state
            .proposals
            .values()
            .filter(|hosted| {
                query
                    .title_terms
                    .iter()
                    .all(|term| hosted.proposal.title.contains(term.as_str()))
            })
            .filter(|hosted| query.author.as_ref().map_or(true, |a| *a == hosted.author))
            .map(|hosted| ProposalRef {
                number: hosted.proposal.number,
                title: hosted.proposal.title.clone(),
                html_url: hosted.proposal.html_url.clone(),
                author: hosted.author.clone(),
            })
            .collect())
    }

    async fn get_proposal(&self, number: u64) -> Result<Proposal, HostError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        enter(state, format!("get {number}"), "get")?;
        state
            .proposals
            .get(&number)
            .map(|hosted| hosted.proposal.clone())
            .ok_or(HostError::NotFound { number })
    }

    async fn create_proposal(&self, proposal: &NewProposal) -> Result<Proposal, HostError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        enter(state, format!("create {}", proposal.head), "create")?;

        let number = state.next_number;
        state.next_number += 1;
        let (author, head_ref) = proposal
            .head
            .split_once(':')
            .unwrap_or(("unknown", proposal.head.as_str()));

        let created = Proposal {
            number,
            node_id: format!("PR_{number}"),
            title: proposal.title.clone(),
            body: proposal.body.clone(),
            head_ref: head_ref.to_string(),
            base_ref: proposal.base.clone(),
            html_url: format!("https://github.com/NixOS/nixpkgs/pull/{number}"),
            is_draft: proposal.draft,
        };
        state.proposals.insert(
            number,
            Hosted {
                proposal: created.clone(),
                author: author.to_string(),
            },
        );
        Ok(created)
    }

    async fn update_proposal(
        &self,
        number: u64,
        update: &ProposalUpdate,
    ) -> Result<Proposal, HostError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        enter(state, format!("update {number}"), "update")?;

        let hosted = state
            .proposals
            .get_mut(&number)
            .ok_or(HostError::NotFound { number })?;
        hosted.proposal.title = update.title.clone();
        hosted.proposal.body = update.body.clone();
        Ok(hosted.proposal.clone())
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), HostError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        enter(state, format!("comment {number}"), "comment")?;
        state.comments.push((number, body.to_string()));
        Ok(())
    }

    async fn mark_ready_for_review(&self, proposal: &Proposal) -> Result<(), HostError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        enter(state, format!("mark_ready {}", proposal.number), "mark_ready")?;

        let number = proposal.number;
        let hosted = state
            .proposals
            .get_mut(&number)
            .ok_or(HostError::NotFound { number })?;
        if hosted.proposal.is_draft {
            hosted.proposal.is_draft = false;
            state.ready_transitions += 1;
        }
        Ok(())
    }
}
