//! Depth-first criteria traversal
//!
//! Starting from the root key, every document is fetched, emitted (unless
//! its connection is omitted), and its connections are resolved
//! recursively. Each subtree returns its own ordered node list, so output
//! order is the declaration order regardless of how many sibling fetches
//! run at once.
//!
//! Siblings are fetched with bounded fan-out (`fan_out` per level). The
//! first failure returns immediately and drops the siblings still in flight.

use certiq_core::{Criteria, CyclePolicy, QueryConfig, QueryError, Result};
use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use futures::FutureExt;

use crate::resolver::{Connection, GraphResolver};
use crate::result::{MatchedCriterion, VisitedNode};

pub struct Traverser<R> {
    resolver: R,
    fan_out: usize,
    max_depth: usize,
    cycle_policy: CyclePolicy,
}

/// What to do at one document: which criteria apply and how it was reached
struct Step<'c> {
    criteria: &'c Criteria,
    matched: MatchedCriterion,
    emit: bool,
}

impl<R: GraphResolver> Traverser<R> {
    pub fn new(resolver: R, config: &QueryConfig) -> Self {
        Self {
            resolver,
            fan_out: config.fan_out.max(1),
            max_depth: config.max_depth,
            cycle_policy: config.cycle_policy,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve `criteria` from `root_key` and return the emitted nodes
    ///
    /// The root is always emitted first.
    ///
    /// # Errors
    ///
    /// Fails on the first document that cannot be fetched or validated.
    /// Failures below the root are wrapped in `ConnectionResolution` naming
    /// the broken connection. Also fails with `CycleDetected` (under
    /// `CyclePolicy::Fail`) or `DepthExceeded`.
    pub async fn traverse(&self, root_key: &str, criteria: &Criteria) -> Result<Vec<VisitedNode>> {
        let root = Step {
            criteria,
            matched: MatchedCriterion::Root,
            emit: true,
        };
        self.resolve(root_key.to_string(), root, Vec::new()).await
    }

    fn resolve<'a>(
        &'a self,
        key: String,
        step: Step<'a>,
        path: Vec<String>,
    ) -> BoxFuture<'a, Result<Vec<VisitedNode>>> {
        async move {
            let depth = path.len();
            let document = self.resolver.fetch(&key).await?;
            let connections = self.resolver.connections(step.criteria, &document);

            tracing::debug!(
                document_key = %key,
                depth,
                emit = step.emit,
                connections = connections.len(),
                "resolved document"
            );

            let mut nodes = Vec::new();
            if step.emit {
                nodes.push(VisitedNode {
                    key: key.clone(),
                    depth,
                    matched_criterion: step.matched,
                    document,
                });
            }

            if connections.is_empty() {
                return Ok(nodes);
            }

            let mut path = path;
            path.push(key);

            for subtree in self.resolve_all(connections, &path).await? {
                nodes.extend(subtree);
            }
            Ok(nodes)
        }
        .boxed()
    }

    /// Resolve sibling connections, returning subtrees in connection order
    async fn resolve_all<'a>(
        &'a self,
        connections: Vec<Connection<'a>>,
        path: &[String],
    ) -> Result<Vec<Vec<VisitedNode>>> {
        let count = connections.len();
        let mut slots: Vec<Option<Vec<VisitedNode>>> = std::iter::repeat_with(|| None).take(count).collect();

        // Boxed before streaming; a closure in the stream type fails the Send bound
        let mut subtrees: Vec<BoxFuture<'a, (usize, Result<Vec<VisitedNode>>)>> = Vec::with_capacity(count);
        for (index, connection) in connections.into_iter().enumerate() {
            let subtree = self.resolve_connection(connection, path.to_vec());
            subtrees.push(async move { (index, subtree.await) }.boxed());
        }

        let mut pending = stream::iter(subtrees).buffer_unordered(self.fan_out);

        while let Some((index, result)) = pending.next().await {
            slots[index] = Some(result?);
        }

        Ok(slots.into_iter().flatten().collect())
    }

    fn resolve_connection<'a>(
        &'a self,
        connection: Connection<'a>,
        path: Vec<String>,
    ) -> BoxFuture<'a, Result<Vec<VisitedNode>>> {
        async move {
            // path is never empty here: it holds at least the document the connection came from
            let from = path.last().cloned().unwrap_or_default();
            let via = connection.via();
            let key = connection.key.clone();

            if path.contains(&key) {
                match self.cycle_policy {
                    CyclePolicy::Skip => {
                        tracing::debug!(document_key = %key, from = %from, via, "skipping cyclic connection");
                        return Ok(Vec::new());
                    }
                    CyclePolicy::Fail => {
                        let err = QueryError::CycleDetected {
                            key: key.clone(),
                            path: path.clone(),
                        };
                        return Err(err.in_connection(key, from, via));
                    }
                }
            }

            if path.len() > self.max_depth {
                let err = QueryError::DepthExceeded {
                    key: key.clone(),
                    max_depth: self.max_depth,
                };
                return Err(err.in_connection(key, from, via));
            }

            let step = Step {
                criteria: connection.criteria(),
                matched: connection.matched(),
                emit: !connection.omit(),
            };

            self.resolve(key.clone(), step, path)
                .await
                .map_err(|err| err.in_connection(key, from, via))
        }
        .boxed()
    }
}
