//! Create/update mappings for rows returned to clients as-is: users,
//! organization types, participants and attachments.

use forum_core::types::DbId;

use crate::models::attachment::{Attachment, CreateAttachment, NewAttachment, UpdateAttachment};
use crate::models::organization_type::{OrganizationType, UpdateOrganizationType};
use crate::models::participant::{
    CreateParticipant, NewParticipant, Participant, UpdateParticipant,
};
use crate::models::user::{UpdateUser, User};

pub fn apply_user_update(user: &mut User, input: &UpdateUser) {
    if let Some(name) = &input.display_name {
        user.display_name = name.trim().to_string();
    }
}

pub fn apply_organization_type_update(
    organization_type: &mut OrganizationType,
    input: &UpdateOrganizationType,
) {
    if let Some(label) = &input.type_label {
        organization_type.type_label = label.trim().to_string();
    }
}

pub fn new_participant(parent_id: DbId, input: &CreateParticipant) -> NewParticipant {
    NewParticipant {
        parent_id,
        entity_id: input.entity_id,
        entity_type: input.entity_type,
        organization_type_id: input.organization_type_id,
    }
}

/// Overwrite the fields present on `input`.
///
/// An absent `organization_type_id` keeps the current type; there is no way
/// to clear it through a patch.
pub fn apply_participant_update(participant: &mut Participant, input: &UpdateParticipant) {
    if let Some(entity_id) = input.entity_id {
        participant.entity_id = entity_id;
    }
    if let Some(entity_type) = input.entity_type {
        participant.entity_type = entity_type;
    }
    if let Some(type_id) = input.organization_type_id {
        participant.organization_type_id = Some(type_id);
    }
}

pub fn new_attachment(parent_id: DbId, input: &CreateAttachment) -> NewAttachment {
    NewAttachment {
        parent_id,
        entity_id: input.entity_id,
        entity_type: input.entity_type,
        url: input.url.trim().to_string(),
    }
}

pub fn apply_attachment_update(attachment: &mut Attachment, input: &UpdateAttachment) {
    if let Some(entity_id) = input.entity_id {
        attachment.entity_id = entity_id;
    }
    if let Some(entity_type) = input.entity_type {
        attachment.entity_type = entity_type;
    }
    if let Some(url) = &input.url {
        attachment.url = url.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::entity_ref::EntityType;

    #[test]
    fn participant_patch_changes_only_given_fields() {
        let mut participant = Participant {
            id: 1,
            parent_id: 5,
            entity_id: 100,
            entity_type: EntityType::User,
            organization_type_id: Some(2),
            created_at: Utc.with_ymd_and_hms(2021, 3, 4, 0, 0, 0).unwrap(),
            updated_at: None,
        };
        apply_participant_update(
            &mut participant,
            &UpdateParticipant {
                entity_type: Some(EntityType::Team),
                ..Default::default()
            },
        );

        assert_eq!(participant.entity_type, EntityType::Team);
        assert_eq!(participant.entity_id, 100);
        assert_eq!(participant.organization_type_id, Some(2));
        assert_eq!(participant.parent_id, 5);
    }

    #[test]
    fn new_attachment_trims_url() {
        let new = new_attachment(
            9,
            &CreateAttachment {
                entity_id: 1,
                entity_type: EntityType::Organization,
                url: " https://files.example.com/a.pdf ".to_string(),
            },
        );
        assert_eq!(new.parent_id, 9);
        assert_eq!(new.url, "https://files.example.com/a.pdf");
    }
}
