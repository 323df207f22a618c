//! CRUD resource families
//!
//! Nine backend collections share the same four operations. Each one is a
//! zero-sized marker implementing [`CrudResource`]; [`ResourceApi`] holds
//! the generic list/create/update/delete.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

use super::error::ClientResult;
use super::http::{ApiClient, API_PREFIX};
use crate::models::{
    Ack, BusinessInfoFields, BusinessInfoPatch, CallFields, CallPatch, CampaignFields,
    CampaignPatch, CustomerFields, CustomerPatch, IntegrationFields, IntegrationPatch,
    OrganizationFields, OrganizationPatch, Record, RuleFields, RulePatch, TemplateFields,
    TemplatePatch, UserFields, UserPatch,
};

/// A REST collection under `/api/v1/<PATH>`
pub trait CrudResource: Send + Sync + 'static {
    /// Collection path segment, e.g. `"templates"`
    const PATH: &'static str;

    /// Human-readable name for messages
    const LABEL: &'static str;

    /// Create shape
    type Fields: Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Partial-update shape
    type Patch: Serialize + From<Self::Fields> + Send + Sync;
}

macro_rules! crud_resource {
    ($(#[$doc:meta])* $name:ident, $path:literal, $label:literal, $fields:ty, $patch:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl CrudResource for $name {
            const PATH: &'static str = $path;
            const LABEL: &'static str = $label;
            type Fields = $fields;
            type Patch = $patch;
        }
    };
}

crud_resource!(
    /// Business profile shown to customers
    BusinessInfoResource, "business-info", "business info", BusinessInfoFields, BusinessInfoPatch
);
crud_resource!(TemplatesResource, "templates", "template", TemplateFields, TemplatePatch);
crud_resource!(CampaignsResource, "campaigns", "campaign", CampaignFields, CampaignPatch);
crud_resource!(
    /// Automation rules
    RulesResource, "rules", "rule", RuleFields, RulePatch
);
crud_resource!(
    IntegrationsResource,
    "integrations",
    "integration",
    IntegrationFields,
    IntegrationPatch
);
crud_resource!(CustomersResource, "customers", "customer", CustomerFields, CustomerPatch);
crud_resource!(
    OrganizationsResource,
    "organizations",
    "organization",
    OrganizationFields,
    OrganizationPatch
);
crud_resource!(UsersResource, "users", "user", UserFields, UserPatch);
crud_resource!(
    /// Voice call log
    CallsResource, "calls", "call", CallFields, CallPatch
);

/// list/create/update/delete for one resource
pub struct ResourceApi<'a, R> {
    client: &'a ApiClient,
    _resource: PhantomData<R>,
}

impl<'a, R: CrudResource> ResourceApi<'a, R> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// `/api/v1/<PATH>`
    pub fn collection_path() -> String {
        format!("{}/{}", API_PREFIX, R::PATH)
    }

    /// `/api/v1/<PATH>/<id>`
    pub fn member_path(id: &str) -> String {
        format!("{}/{}/{}", API_PREFIX, R::PATH, urlencoding::encode(id))
    }

    pub async fn list(&self) -> ClientResult<Vec<Record<R::Fields>>> {
        self.client.get(&Self::collection_path()).await
    }

    pub async fn create(&self, fields: &R::Fields) -> ClientResult<Record<R::Fields>> {
        self.client.post(&Self::collection_path(), fields).await
    }

    pub async fn update(&self, id: &str, patch: &R::Patch) -> ClientResult<Record<R::Fields>> {
        self.client.patch(&Self::member_path(id), patch).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Ack> {
        self.client.delete(&Self::member_path(id)).await
    }
}

impl ApiClient {
    /// Typed CRUD access for any resource
    pub fn resource<R: CrudResource>(&self) -> ResourceApi<'_, R> {
        ResourceApi::new(self)
    }

    pub fn business_info(&self) -> ResourceApi<'_, BusinessInfoResource> {
        self.resource()
    }

    pub fn templates(&self) -> ResourceApi<'_, TemplatesResource> {
        self.resource()
    }

    pub fn campaigns(&self) -> ResourceApi<'_, CampaignsResource> {
        self.resource()
    }

    pub fn rules(&self) -> ResourceApi<'_, RulesResource> {
        self.resource()
    }

    pub fn integrations(&self) -> ResourceApi<'_, IntegrationsResource> {
        self.resource()
    }

    pub fn customers(&self) -> ResourceApi<'_, CustomersResource> {
        self.resource()
    }

    pub fn organizations(&self) -> ResourceApi<'_, OrganizationsResource> {
        self.resource()
    }

    pub fn users(&self) -> ResourceApi<'_, UsersResource> {
        self.resource()
    }

    pub fn calls(&self) -> ResourceApi<'_, CallsResource> {
        self.resource()
    }
}
