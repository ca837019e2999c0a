// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use uatrack_protocol_schema::{HitType, Parameter};

use super::request::{HitRequest, boolean_accessors, hit_builder_common,
                     integer_accessors, text_accessors};

/// Builder for `t=social` hits. All three fields are required by the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialHit {
    pub(crate) request: HitRequest,
}

hit_builder_common!(SocialHit, HitType::Social);

impl SocialHit {
    #[must_use]
    pub fn new(
        network: impl AsRef<str>,
        action: impl AsRef<str>,
        target: impl AsRef<str>,
    ) -> SocialHit {
        SocialHit::default()
            .social_network(network)
            .social_action(action)
            .social_action_target(target)
    }

    text_accessors! {
        /// Social network (`sn`, max 50 bytes). Example: `sn=facebook`.
        social_network, get_social_network => Parameter::SocialNetwork
    }

    text_accessors! {
        /// Social action (`sa`, max 50 bytes). Example: `sa=like`.
        social_action, get_social_action => Parameter::SocialAction
    }

    text_accessors! {
        /// Target of the action (`st`, max 2048 bytes), typically a URL.
        social_action_target, get_social_action_target => Parameter::SocialActionTarget
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn constructor_fills_all_three_required_fields() {
        let hit = SocialHit::new("facebook", "like", "https://example.com");
        assert_eq!(hit.get_social_network(), Some("facebook"));
        assert_eq!(hit.get_social_action(), Some("like"));
        assert_eq!(hit.get_social_action_target(), Some("https://example.com"));
        assert!(HitRequest::from(hit).to_post_body().starts_with("t=social&"));
    }
}
