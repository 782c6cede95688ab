use std::collections::BTreeMap;

use serde_json::Value;
use vnconnector_core::Client;

use crate::{
    normalize_model_name, Condition, ConditionValue, Pagination, RawQuery, RelationLink,
    ScopeParams, WhereClause, WhereFragment,
};

/// A remote table together with the filters, sort order, pagination and relations of the next
/// request.
///
/// Builder methods consume and return the model, so queries are written as a chain. Requests
/// borrow the model, the same model can be sent several times.
#[derive(Debug, Clone)]
pub struct RemoteModel {
    pub(crate) client: Client,
    pub(crate) table: String,
    pub(crate) token: String,
    scope: ScopeParams,
    condition: BTreeMap<String, Condition>,
    raw: Option<RawQuery>,
    paginate: Option<Pagination>,
    order_by: Option<String>,
    pub(crate) links: Vec<RelationLink>,
}

impl RemoteModel {
    pub(crate) fn new(client: Client, name: &str, token: String, scope: ScopeParams) -> Self {
        Self {
            client,
            table: normalize_model_name(name),
            token,
            scope,
            condition: BTreeMap::new(),
            raw: None,
            paginate: None,
            order_by: None,
            links: Vec::new(),
        }
    }

    /// The remote table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Filter on `field operator value`. Calling it again for the same field replaces the
    /// previous filter.
    pub fn and_where(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.condition
            .insert(field.into(), Condition::new(operator, value));
        self
    }

    /// Filter with a raw template and its positional bindings, replacing every filter set so
    /// far.
    ///
    /// Filters added with [Self::and_where] afterwards take precedence: the raw query is only
    /// sent when no condition is set.
    pub fn where_raw<I, V>(mut self, template: impl Into<String>, binding: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.condition.clear();
        self.raw = Some(RawQuery {
            template: template.into(),
            binding: binding.into_iter().map(Into::into).collect(),
        });
        self
    }

    #[allow(missing_docs)]
    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.paginate = Some(Pagination { page, page_size });
        self
    }

    /// Same as `page(1, limit)`.
    pub fn limit(self, limit: u32) -> Self {
        self.page(1, limit)
    }

    /// Sort expression, passed through as is. An empty expression clears the sort order.
    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        let order = order.into();
        self.order_by = (!order.is_empty()).then_some(order);
        self
    }

    /// Embed rows of `model` matching `condition` into `field`, selecting every column.
    pub fn with(
        self,
        field: impl Into<String>,
        model: impl Into<String>,
        condition: Value,
    ) -> Self {
        self.with_link(RelationLink::new(field, model, condition))
    }

    /// Embed a related model. Links are sent in the order they were added.
    pub fn with_link(mut self, link: RelationLink) -> Self {
        self.links.push(link);
        self
    }

    /// Build the where-clause of the next request, merging the ambient parameters.
    ///
    /// Conditions win over a raw query. Ambient parameters are added to the conditions unless the
    /// field is already filtered, or appended to the raw template as ` AND` clauses with their
    /// values appended to the binding.
    pub fn build_where(&self) -> WhereFragment {
        let raw = self.raw.as_ref().filter(|raw| !raw.template.is_empty());

        let clause = match raw {
            Some(raw) if self.condition.is_empty() => {
                let mut raw = raw.clone();
                self.scope.merge_into_raw(&mut raw);
                WhereClause::Raw(raw)
            }
            _ => {
                let mut condition = self.condition.clone();
                self.scope.merge_into_condition(&mut condition);
                WhereClause::Condition(condition)
            }
        };

        WhereFragment {
            clause,
            paginate: self.paginate,
            order_by: self.order_by.clone(),
        }
    }
}
